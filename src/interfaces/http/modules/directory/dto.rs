//! Directory DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    NewParking, NewUser, NewVehicle, Parking, ParkingChanges, User, UserChanges, UserRole,
    Vehicle, VehicleChanges, VehicleType,
};

// ── Users ──────────────────────────────────────────────────────────

fn default_role() -> UserRole {
    UserRole::Customer
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 11, message = "must be 11 digits"))]
    pub phone_number: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        NewUser {
            full_name: r.full_name,
            email: r.email,
            phone_number: r.phone_number,
            role: r.role,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(equal = 11, message = "must be 11 digits"))]
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        UserChanges {
            full_name: r.full_name,
            email: r.email,
            phone_number: r.phone_number,
            role: r.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

// ── Vehicles ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub user_id: i32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub color: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub model: String,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(r: CreateVehicleRequest) -> Self {
        NewVehicle {
            user_id: r.user_id,
            vehicle_type: r.vehicle_type,
            plate_number: r.plate_number,
            color: r.color,
            model: r.model,
        }
    }
}

/// The owning user cannot be changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,
    #[validate(length(max = 30))]
    pub color: Option<String>,
    #[validate(length(max = 50))]
    pub model: Option<String>,
}

impl From<UpdateVehicleRequest> for VehicleChanges {
    fn from(r: UpdateVehicleRequest) -> Self {
        VehicleChanges {
            vehicle_type: r.vehicle_type,
            plate_number: r.plate_number,
            color: r.color,
            model: r.model,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub plate_number: String,
    pub color: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            vehicle_type: v.vehicle_type,
            plate_number: v.plate_number,
            color: v.color,
            model: v.model,
            created_at: v.created_at,
        }
    }
}

// ── Parkings ───────────────────────────────────────────────────────

fn default_open() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateParkingRequest {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub owner_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[serde(default = "default_open")]
    pub is_open: bool,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub total_capacity: i32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub latitude: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub longitude: Decimal,
}

impl From<CreateParkingRequest> for NewParking {
    fn from(r: CreateParkingRequest) -> Self {
        NewParking {
            owner_id: r.owner_id,
            name: r.name,
            address: r.address,
            is_open: r.is_open,
            total_capacity: r.total_capacity,
            hourly_rate: r.hourly_rate,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateParkingRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    pub is_open: Option<bool>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub total_capacity: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub latitude: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub longitude: Option<Decimal>,
}

impl From<UpdateParkingRequest> for ParkingChanges {
    fn from(r: UpdateParkingRequest) -> Self {
        ParkingChanges {
            name: r.name,
            address: r.address,
            is_open: r.is_open,
            total_capacity: r.total_capacity,
            hourly_rate: r.hourly_rate,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub is_open: bool,
    pub total_capacity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub latitude: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub longitude: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Parking> for ParkingDto {
    fn from(p: Parking) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            name: p.name,
            address: p.address,
            is_open: p.is_open,
            total_capacity: p.total_capacity,
            hourly_rate: p.hourly_rate,
            latitude: p.latitude,
            longitude: p.longitude,
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_phone_must_have_eleven_digits() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"fullName":"Sara","email":"sara@example.com","phoneNumber":"0912"}"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Customer);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn parking_accepts_float_coordinates() {
        let req: CreateParkingRequest = serde_json::from_str(
            r#"{"ownerId":1,"name":"Central","address":"Main St","hourlyRate":2.5,"latitude":35.7,"longitude":51.4}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.is_open);
        assert_eq!(req.hourly_rate, Decimal::new(25, 1));
    }

    #[test]
    fn parking_update_is_partial() {
        let req: UpdateParkingRequest =
            serde_json::from_str(r#"{"isOpen":false,"hourlyRate":7.5}"#).unwrap();
        assert!(req.validate().is_ok());
        let changes = ParkingChanges::from(req);
        assert_eq!(changes.is_open, Some(false));
        assert_eq!(changes.hourly_rate, Some(Decimal::new(75, 1)));
        assert!(changes.latitude.is_none());

        let zero: UpdateParkingRequest = serde_json::from_str(r#"{"totalCapacity":0}"#).unwrap();
        assert!(zero.validate().is_err());
        assert!(serde_json::from_str::<UpdateParkingRequest>(r#"{"ownerId":3}"#).is_err());
    }

    #[test]
    fn user_update_checks_present_fields_only() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"role":"staff"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"email":"not-an-email","phoneNumber":"0912"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("phone_number"));
    }
}
