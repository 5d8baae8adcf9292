//! Slot management

mod service;

pub use service::SlotService;
