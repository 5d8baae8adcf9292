//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::checkin::CheckinRepository;
use crate::domain::directory::DirectoryRepository;
use crate::domain::repositories::{RepositoryProvider, UnitOfWork};
use crate::domain::reservation::ReservationRepository;
use crate::domain::slot::SlotRepository;

use super::checkin_repository::SeaOrmCheckinRepository;
use super::directory_repository::SeaOrmDirectoryRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::slot_repository::SeaOrmSlotRepository;
use super::unit_of_work::SeaOrmUnitOfWork;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let slots = repos.slots().find_by_parking(1).await?;
/// let mut tx = repos.unit_of_work().begin().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    slots: SeaOrmSlotRepository,
    reservations: SeaOrmReservationRepository,
    checkins: SeaOrmCheckinRepository,
    directory: SeaOrmDirectoryRepository,
    unit_of_work: SeaOrmUnitOfWork,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            slots: SeaOrmSlotRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            checkins: SeaOrmCheckinRepository::new(db.clone()),
            directory: SeaOrmDirectoryRepository::new(db.clone()),
            unit_of_work: SeaOrmUnitOfWork::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn checkins(&self) -> &dyn CheckinRepository {
        &self.checkins
    }

    fn directory(&self) -> &dyn DirectoryRepository {
        &self.directory
    }

    fn unit_of_work(&self) -> &dyn UnitOfWork {
        &self.unit_of_work
    }
}
