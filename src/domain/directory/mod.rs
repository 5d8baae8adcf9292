//! Users, vehicles and parking lots
//!
//! Collaborator records. The reservation and check-in engines only read them.

pub mod model;
pub mod repository;

pub use model::{
    NewParking, NewUser, NewVehicle, Parking, ParkingChanges, User, UserChanges, UserRole,
    Vehicle, VehicleChanges, VehicleType,
};
pub use repository::DirectoryRepository;
