//! Collaborator records referenced by reservations and check-ins

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Customer,
    Staff,
    Owner,
    Guard,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Owner => "owner",
            Self::Guard => "guard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Truck,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Truck => "truck",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_type: VehicleType,
    pub plate_number: String,
    pub color: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub user_id: i32,
    pub vehicle_type: VehicleType,
    pub plate_number: String,
    pub color: String,
    pub model: String,
}

/// A parking lot
#[derive(Debug, Clone, PartialEq)]
pub struct Parking {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub is_open: bool,
    pub total_capacity: i32,
    pub hourly_rate: Decimal,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewParking {
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub is_open: bool,
    pub total_capacity: i32,
    pub hourly_rate: Decimal,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Profile fields a user update may change
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.role.is_none()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub vehicle_type: Option<VehicleType>,
    pub plate_number: Option<String>,
    pub color: Option<String>,
    pub model: Option<String>,
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        self.vehicle_type.is_none()
            && self.plate_number.is_none()
            && self.color.is_none()
            && self.model.is_none()
    }

    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(plate_number) = self.plate_number {
            vehicle.plate_number = plate_number;
        }
        if let Some(color) = self.color {
            vehicle.color = color;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
    }
}

/// The owner is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct ParkingChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_open: Option<bool>,
    pub total_capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl ParkingChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.is_open.is_none()
            && self.total_capacity.is_none()
            && self.hourly_rate.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    pub fn apply(self, parking: &mut Parking) {
        if let Some(name) = self.name {
            parking.name = name;
        }
        if let Some(address) = self.address {
            parking.address = address;
        }
        if let Some(is_open) = self.is_open {
            parking.is_open = is_open;
        }
        if let Some(total_capacity) = self.total_capacity {
            parking.total_capacity = total_capacity;
        }
        if let Some(hourly_rate) = self.hourly_rate {
            parking.hourly_rate = hourly_rate;
        }
        if let Some(latitude) = self.latitude {
            parking.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            parking.longitude = longitude;
        }
    }
}
