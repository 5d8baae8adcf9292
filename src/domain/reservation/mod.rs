//! Reservation aggregate
//!
//! Contains the Reservation entity, the overlap rule and the repository interface.

pub mod model;
pub mod repository;

pub use model::{windows_overlap, NewReservation, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
