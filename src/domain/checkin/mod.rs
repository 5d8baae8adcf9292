//! Check-in aggregate

pub mod model;
pub mod repository;

pub use model::{Checkin, FinePolicy, NewCheckin};
pub use repository::CheckinRepository;
