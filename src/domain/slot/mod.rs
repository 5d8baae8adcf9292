//! Slot aggregate

pub mod model;
pub mod repository;

pub use model::{NewSlot, Slot, SlotChanges, SlotType};
pub use repository::SlotRepository;
