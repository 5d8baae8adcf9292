//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `UnitOfWork` / `SlotTransaction`: the transactional port used by every
//!   operation that flips a slot's availability
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::checkin::{Checkin, CheckinRepository, NewCheckin};
use super::directory::DirectoryRepository;
use super::reservation::{NewReservation, Reservation, ReservationRepository, ReservationStatus};
use super::slot::{Slot, SlotRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let slot = repos.slots().find_by_id(3).await?;
///     let mut tx = repos.unit_of_work().begin().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn slots(&self) -> &dyn SlotRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn checkins(&self) -> &dyn CheckinRepository;
    fn directory(&self) -> &dyn DirectoryRepository;
    fn unit_of_work(&self) -> &dyn UnitOfWork;
}

// ── Unit of work ────────────────────────────────────────────────

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn SlotTransaction>>;
}

/// One open store transaction.
///
/// Everything done through it becomes visible on [`commit`](Self::commit);
/// dropping it without committing rolls everything back.
#[async_trait]
pub trait SlotTransaction: Send {
    async fn user_exists(&mut self, user_id: i32) -> DomainResult<bool>;

    async fn vehicle_exists(&mut self, vehicle_id: i32) -> DomainResult<bool>;

    /// Read the slot row holding an exclusive row lock until the end of the
    /// transaction (on backends that support row locks).
    async fn lock_slot(&mut self, slot_id: i32) -> DomainResult<Option<Slot>>;

    /// Reservations with status `reserved` on the slot
    async fn reserved_for_slot(&mut self, slot_id: i32) -> DomainResult<Vec<Reservation>>;

    async fn find_reservation(&mut self, id: i32) -> DomainResult<Option<Reservation>>;

    async fn insert_reservation(&mut self, new: NewReservation) -> DomainResult<Reservation>;

    async fn set_reservation_status(
        &mut self,
        id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Reservation>;

    async fn find_checkin(&mut self, id: i32) -> DomainResult<Option<Checkin>>;

    /// Check-in with exactly this `(vehicle, slot, entry time)` tuple
    async fn find_checkin_at(
        &mut self,
        vehicle_id: i32,
        slot_id: i32,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<Option<Checkin>>;

    async fn insert_checkin(&mut self, new: NewCheckin) -> DomainResult<Checkin>;

    /// Record exit time and fine on an open check-in
    async fn close_checkin(
        &mut self,
        id: i32,
        exit_time: DateTime<Utc>,
        over_stay_fine: Decimal,
    ) -> DomainResult<Checkin>;

    /// Fails with `NotFound` if no slot row was updated
    async fn set_slot_availability(&mut self, slot_id: i32, is_available: bool)
        -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
}
