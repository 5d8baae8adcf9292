//! Slot repository interface

use async_trait::async_trait;

use super::model::{NewSlot, Slot};
use crate::domain::DomainResult;

/// Slot records as managed by the slot-management collaborator.
///
/// No availability setter: `is_available` only
/// changes inside a [`SlotTransaction`](crate::domain::SlotTransaction).
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, slot: NewSlot) -> DomainResult<Slot>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Slot>>;

    async fn find_by_parking(&self, parking_id: i32) -> DomainResult<Vec<Slot>>;

    /// Persist code / type of an existing slot
    async fn update(&self, slot: Slot) -> DomainResult<Slot>;

    /// Delete a slot; its reservations and check-ins cascade.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
