//! Check-in / check-out engine

mod service;

pub use service::CheckinService;
