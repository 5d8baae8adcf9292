//! Reservation engine

mod service;

pub use service::ReservationService;
