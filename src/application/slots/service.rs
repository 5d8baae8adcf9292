//! Slot management
//!
//! Plain CRUD over slots. Availability is set once at creation; afterwards
//! only the reservation and check-in engines change it.

use std::sync::Arc;

use tracing::info;

use crate::application::SlotLocks;
use crate::domain::{DomainError, DomainResult, NewSlot, RepositoryProvider, Slot, SlotChanges};
use crate::shared::validations::validate_id;

pub struct SlotService {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLocks>,
}

impl SlotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: Arc<SlotLocks>) -> Self {
        Self { repos, locks }
    }

    pub async fn add(&self, new: NewSlot) -> DomainResult<Slot> {
        validate_id("parkingId", new.parking_id)?;
        self.require_parking(new.parking_id).await?;
        let slot = self.repos.slots().create(new).await?;
        info!(
            slot_id = slot.id,
            parking_id = slot.parking_id,
            code = %slot.code,
            "Slot added"
        );
        Ok(slot)
    }

    pub async fn update(&self, slot_id: i32, changes: SlotChanges) -> DomainResult<Slot> {
        validate_id("id", slot_id)?;
        if changes.is_empty() {
            return Err(DomainError::validation("body", "No fields to update"));
        }

        let _guard = self.locks.acquire(slot_id).await;
        let mut slot = self
            .repos
            .slots()
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Slot not found".into()))?;
        changes.apply(&mut slot);
        let slot = self.repos.slots().update(slot).await?;
        info!(slot_id, "Slot updated");
        Ok(slot)
    }

    /// Delete a slot together with its reservations and check-ins.
    pub async fn delete(&self, slot_id: i32) -> DomainResult<()> {
        validate_id("id", slot_id)?;

        let _guard = self.locks.acquire(slot_id).await;
        if self.repos.slots().find_by_id(slot_id).await?.is_none() {
            return Err(DomainError::NotFound("Slot not found".into()));
        }
        self.repos.slots().delete(slot_id).await?;
        info!(slot_id, "Slot deleted");
        Ok(())
    }

    pub async fn list_by_parking(&self, parking_id: i32) -> DomainResult<Vec<Slot>> {
        validate_id("parkingId", parking_id)?;
        self.require_parking(parking_id).await?;
        self.repos.slots().find_by_parking(parking_id).await
    }

    async fn require_parking(&self, parking_id: i32) -> DomainResult<()> {
        match self.repos.directory().find_parking(parking_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound("Parking not found".into())),
        }
    }
}
