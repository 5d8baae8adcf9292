//! Users, vehicles and parking lots

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewParking, NewUser, NewVehicle, Parking, ParkingChanges,
    RepositoryProvider, User, UserChanges, Vehicle, VehicleChanges,
};
use crate::shared::validations::validate_id;

pub struct DirectoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DirectoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn register_user(&self, new: NewUser) -> DomainResult<User> {
        let user = self.repos.directory().create_user(new).await?;
        info!(user_id = user.id, role = user.role.as_str(), "User registered");
        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        validate_id("id", id)?;
        self.repos
            .directory()
            .find_user(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repos.directory().list_users().await
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> DomainResult<User> {
        if changes.is_empty() {
            return Err(DomainError::validation("body", "No fields to update"));
        }
        let mut user = self.get_user(id).await?;
        changes.apply(&mut user);
        let user = self.repos.directory().update_user(user).await?;
        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Removes the user with its vehicles, parking lots and reservations.
    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        validate_id("id", id)?;
        self.repos.directory().delete_user(id).await.map_err(|e| match e {
            DomainError::NotFound(_) => DomainError::NotFound("User not found".into()),
            other => other,
        })?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    pub async fn register_vehicle(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        validate_id("userId", new.user_id)?;
        let vehicle = self.repos.directory().create_vehicle(new).await?;
        info!(
            vehicle_id = vehicle.id,
            user_id = vehicle.user_id,
            plate = %vehicle.plate_number,
            "Vehicle registered"
        );
        Ok(vehicle)
    }

    pub async fn get_vehicle(&self, id: i32) -> DomainResult<Vehicle> {
        validate_id("id", id)?;
        self.repos
            .directory()
            .find_vehicle(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Vehicle not found".into()))
    }

    /// An unknown user simply has no vehicles.
    pub async fn list_vehicles_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        validate_id("userId", user_id)?;
        self.repos.directory().find_vehicles_by_user(user_id).await
    }

    pub async fn update_vehicle(&self, id: i32, changes: VehicleChanges) -> DomainResult<Vehicle> {
        if changes.is_empty() {
            return Err(DomainError::validation("body", "No fields to update"));
        }
        let mut vehicle = self.get_vehicle(id).await?;
        changes.apply(&mut vehicle);
        let vehicle = self.repos.directory().update_vehicle(vehicle).await?;
        info!(vehicle_id = vehicle.id, plate = %vehicle.plate_number, "Vehicle updated");
        Ok(vehicle)
    }

    pub async fn delete_vehicle(&self, id: i32) -> DomainResult<()> {
        validate_id("id", id)?;
        self.repos.directory().delete_vehicle(id).await.map_err(|e| match e {
            DomainError::NotFound(_) => DomainError::NotFound("Vehicle not found".into()),
            other => other,
        })?;
        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }

    pub async fn register_parking(&self, new: NewParking) -> DomainResult<Parking> {
        validate_id("ownerId", new.owner_id)?;
        let parking = self.repos.directory().create_parking(new).await?;
        info!(parking_id = parking.id, owner_id = parking.owner_id, "Parking registered");
        Ok(parking)
    }

    pub async fn get_parking(&self, id: i32) -> DomainResult<Parking> {
        validate_id("id", id)?;
        self.repos
            .directory()
            .find_parking(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Parking not found".into()))
    }

    pub async fn update_parking(&self, id: i32, changes: ParkingChanges) -> DomainResult<Parking> {
        if changes.is_empty() {
            return Err(DomainError::validation("body", "No fields to update"));
        }
        if matches!(changes.total_capacity, Some(c) if c < 1) {
            return Err(DomainError::validation(
                "totalCapacity",
                "Total capacity must be at least 1",
            ));
        }
        let mut parking = self.get_parking(id).await?;
        changes.apply(&mut parking);
        let parking = self.repos.directory().update_parking(parking).await?;
        info!(parking_id = parking.id, is_open = parking.is_open, "Parking updated");
        Ok(parking)
    }

    /// Removes the parking lot with its slots and their bookings.
    pub async fn delete_parking(&self, id: i32) -> DomainResult<()> {
        validate_id("id", id)?;
        self.repos.directory().delete_parking(id).await.map_err(|e| match e {
            DomainError::NotFound(_) => DomainError::NotFound("Parking not found".into()),
            other => other,
        })?;
        info!(parking_id = id, "Parking deleted");
        Ok(())
    }
}
