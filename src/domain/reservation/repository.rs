//! Reservation repository interface

use async_trait::async_trait;

use super::model::Reservation;
use crate::domain::DomainResult;

/// Read side of reservations. Writes go through a
/// [`SlotTransaction`](crate::domain::SlotTransaction).
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// All reservations of a user, any status, oldest first
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>>;
}
