//! Directory repository interface

use async_trait::async_trait;

use super::model::{NewParking, NewUser, NewVehicle, Parking, User, Vehicle};
use crate::domain::DomainResult;

/// Plain record access for users, vehicles and parking lots.
///
/// Deletes cascade to everything that references the record: a vehicle takes
/// its reservations and check-ins, a parking lot its slots (and theirs), a
/// user its vehicles, parking lots and reservations.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;
    async fn find_user(&self, id: i32) -> DomainResult<Option<User>>;
    async fn list_users(&self) -> DomainResult<Vec<User>>;
    /// Persist the profile fields of an existing user
    async fn update_user(&self, user: User) -> DomainResult<User>;
    async fn delete_user(&self, id: i32) -> DomainResult<()>;

    /// Fails with `NotFound` when the owning user does not exist
    async fn create_vehicle(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;
    async fn find_vehicle(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    async fn find_vehicles_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>>;
    async fn update_vehicle(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
    async fn delete_vehicle(&self, id: i32) -> DomainResult<()>;

    /// Fails with `NotFound` when the owner does not exist
    async fn create_parking(&self, parking: NewParking) -> DomainResult<Parking>;
    async fn find_parking(&self, id: i32) -> DomainResult<Option<Parking>>;
    async fn update_parking(&self, parking: Parking) -> DomainResult<Parking>;
    async fn delete_parking(&self, id: i32) -> DomainResult<()>;
}
