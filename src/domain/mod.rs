pub mod checkin;
pub mod directory;
pub mod repositories;
pub mod reservation;
pub mod slot;

// Re-export commonly used types
pub use checkin::{Checkin, CheckinRepository, FinePolicy, NewCheckin};
pub use directory::{
    DirectoryRepository, NewParking, NewUser, NewVehicle, Parking, ParkingChanges, User,
    UserChanges, UserRole, Vehicle, VehicleChanges, VehicleType,
};
pub use repositories::{DomainResult, RepositoryProvider, SlotTransaction, UnitOfWork};
pub use reservation::{
    windows_overlap, NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
pub use slot::{NewSlot, Slot, SlotChanges, SlotRepository, SlotType};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
