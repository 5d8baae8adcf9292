//! Application layer - use-case orchestration
//!
//! HTTP handlers are thin wrappers that delegate to these services.

pub mod checkins;
pub mod directory;
pub mod reservations;
pub mod slot_locks;
pub mod slots;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use checkins::CheckinService;
pub use directory::DirectoryService;
pub use reservations::ReservationService;
pub use slot_locks::SlotLocks;
pub use slots::SlotService;

use crate::domain::{FinePolicy, RepositoryProvider};

/// All services sharing one repository provider and one set of slot locks.
#[derive(Clone)]
pub struct ParkingServices {
    pub reservations: Arc<ReservationService>,
    pub checkins: Arc<CheckinService>,
    pub slots: Arc<SlotService>,
    pub directory: Arc<DirectoryService>,
}

impl ParkingServices {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: FinePolicy) -> Self {
        let locks = Arc::new(SlotLocks::new());
        Self {
            reservations: Arc::new(ReservationService::new(repos.clone(), locks.clone())),
            checkins: Arc::new(CheckinService::new(repos.clone(), locks.clone(), policy)),
            slots: Arc::new(SlotService::new(repos.clone(), locks)),
            directory: Arc::new(DirectoryService::new(repos)),
        }
    }
}
