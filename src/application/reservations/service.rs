//! Reservation engine
//!
//! Creates and cancels reservations and keeps the slot's availability flag
//! in step with them. Every mutation runs under the slot lock and inside one
//! store transaction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SlotLocks;
use crate::domain::{
    DomainError, DomainResult, NewReservation, RepositoryProvider, Reservation,
    ReservationStatus,
};
use crate::shared::validations::{validate_id, validate_window};

const NOT_CANCELLABLE: &str = "Reservation not found or already cancelled";

fn record_outcome(outcome: &'static str) {
    metrics::counter!("parking_reservations_total", "outcome" => outcome).increment(1);
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLocks>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: Arc<SlotLocks>) -> Self {
        Self { repos, locks }
    }

    /// Book `slot_id` for `[start_time, end_time]`.
    ///
    /// Fails with `NotFound` for a missing user, vehicle or slot (checked in
    /// that order), `Conflict` when a `reserved` booking overlaps the window
    /// and `Forbidden` when the slot is currently unavailable.
    pub async fn create(&self, req: NewReservation) -> DomainResult<Reservation> {
        validate_id("userId", req.user_id)?;
        validate_id("vehicleId", req.vehicle_id)?;
        validate_id("slotId", req.slot_id)?;
        validate_window(req.start_time, req.end_time)?;

        let _guard = self.locks.acquire(req.slot_id).await;
        let mut tx = self.repos.unit_of_work().begin().await?;

        if !tx.user_exists(req.user_id).await? {
            return Err(DomainError::NotFound("user not found".into()));
        }
        if !tx.vehicle_exists(req.vehicle_id).await? {
            return Err(DomainError::NotFound("Vehicle not found".into()));
        }
        let slot = tx
            .lock_slot(req.slot_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Slot not found".into()))?;

        let reserved = tx.reserved_for_slot(slot.id).await?;
        if let Some(existing) = reserved
            .iter()
            .find(|r| r.blocks(req.start_time, req.end_time))
        {
            info!(
                slot_id = slot.id,
                existing_reservation = existing.id,
                "Reservation window overlaps an existing booking"
            );
            record_outcome("conflict");
            return Err(DomainError::Conflict(
                "Slot is not available for the selected time".into(),
            ));
        }

        if !slot.is_available {
            record_outcome("unavailable");
            return Err(DomainError::Forbidden(
                "Slot not available, please select another slot".into(),
            ));
        }

        let reservation = tx.insert_reservation(req).await?;
        if let Err(e) = tx.set_slot_availability(slot.id, false).await {
            warn!(slot_id = slot.id, error = %e, "Failed to mark slot reserved");
            record_outcome("failed");
            return Err(e.into_operation("Failed to update slot availability"));
        }
        if let Err(e) = tx.commit().await {
            record_outcome("failed");
            return Err(e.into_operation("Failed to commit reservation"));
        }

        record_outcome("created");
        info!(
            reservation_id = reservation.id,
            slot_id = reservation.slot_id,
            user_id = reservation.user_id,
            start = %reservation.start_time,
            end = %reservation.end_time,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Cancel a `reserved` booking and release its slot.
    pub async fn cancel(&self, reservation_id: i32) -> DomainResult<Reservation> {
        validate_id("id", reservation_id)?;

        let current = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .filter(Reservation::is_active)
            .ok_or_else(|| DomainError::NotFound(NOT_CANCELLABLE.into()))?;

        let _guard = self.locks.acquire(current.slot_id).await;
        let mut tx = self.repos.unit_of_work().begin().await?;

        // Re-read under the lock; a concurrent cancel may have won.
        tx.find_reservation(reservation_id)
            .await?
            .filter(Reservation::is_active)
            .ok_or_else(|| DomainError::NotFound(NOT_CANCELLABLE.into()))?;

        let cancelled = tx
            .set_reservation_status(reservation_id, ReservationStatus::Cancelled)
            .await?;
        if let Err(e) = tx.set_slot_availability(cancelled.slot_id, true).await {
            warn!(slot_id = cancelled.slot_id, error = %e, "Failed to release slot");
            return Err(e.into_operation("Failed to update slot availability"));
        }
        tx.commit()
            .await
            .map_err(|e| e.into_operation("Failed to commit cancellation"))?;

        record_outcome("cancelled");
        info!(
            reservation_id,
            slot_id = cancelled.slot_id,
            "Reservation cancelled"
        );
        Ok(cancelled)
    }

    pub async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        validate_id("userId", user_id)?;
        if self.repos.directory().find_user(user_id).await?.is_none() {
            return Err(DomainError::NotFound("user not found".into()));
        }
        self.repos.reservations().find_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{at, seed, Seed};

    fn service(seed: &Seed) -> ReservationService {
        ReservationService::new(seed.repos(), seed.locks.clone())
    }

    fn request(seed: &Seed, start: (u32, u32), end: (u32, u32)) -> NewReservation {
        NewReservation {
            user_id: seed.user_id,
            vehicle_id: seed.vehicle_id,
            slot_id: seed.slot_id,
            start_time: at(start.0, start.1),
            end_time: at(end.0, end.1),
        }
    }

    #[tokio::test]
    async fn reserve_conflict_cancel_walkthrough() {
        let seed = seed().await;
        let svc = service(&seed);

        let first = svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        assert_eq!(first.status, ReservationStatus::Reserved);
        assert!(!seed.slot_available().await);

        let err = svc
            .create(request(&seed, (10, 30), (11, 30)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Conflict("Slot is not available for the selected time".into())
        );

        let cancelled = svc.cancel(first.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(seed.slot_available().await);
    }

    #[tokio::test]
    async fn created_reservation_is_listed_for_user() {
        let seed = seed().await;
        let svc = service(&seed);

        let created = svc.create(request(&seed, (8, 0), (9, 0))).await.unwrap();
        let listed = svc.list_by_user(seed.user_id).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].status, ReservationStatus::Reserved);
    }

    #[tokio::test]
    async fn unavailable_slot_is_forbidden_without_overlap() {
        let seed = seed().await;
        let svc = service(&seed);

        svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        let err = svc
            .create(request(&seed, (14, 0), (15, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn back_to_back_windows_conflict() {
        let seed = seed().await;
        let svc = service(&seed);

        svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        let err = svc
            .create(request(&seed, (11, 0), (12, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_entities_are_reported_in_order() {
        let seed = seed().await;
        let svc = service(&seed);

        let mut req = request(&seed, (10, 0), (11, 0));
        req.user_id = 99;
        req.slot_id = 99;
        assert_eq!(
            svc.create(req).await.unwrap_err(),
            DomainError::NotFound("user not found".into())
        );

        let mut req = request(&seed, (10, 0), (11, 0));
        req.vehicle_id = 99;
        req.slot_id = 99;
        assert_eq!(
            svc.create(req).await.unwrap_err(),
            DomainError::NotFound("Vehicle not found".into())
        );

        let mut req = request(&seed, (10, 0), (11, 0));
        req.slot_id = 99;
        assert_eq!(
            svc.create(req).await.unwrap_err(),
            DomainError::NotFound("Slot not found".into())
        );
    }

    #[tokio::test]
    async fn failed_requests_leave_no_slot_locks() {
        let seed = seed().await;
        let svc = service(&seed);

        for slot_id in 500..600 {
            let mut req = request(&seed, (10, 0), (11, 0));
            req.slot_id = slot_id;
            assert!(matches!(
                svc.create(req).await,
                Err(DomainError::NotFound(_))
            ));
        }
        assert!(seed.locks.is_empty());

        let r = svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        svc.cancel(r.id).await.unwrap();
        assert!(seed.locks.is_empty());
    }

    #[tokio::test]
    async fn ill_ordered_window_is_rejected() {
        let seed = seed().await;
        let svc = service(&seed);

        let err = svc
            .create(request(&seed, (11, 0), (10, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "endTime", .. }));

        let err = svc
            .create(request(&seed, (10, 0), (10, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected() {
        let seed = seed().await;
        let svc = service(&seed);

        let mut req = request(&seed, (10, 0), (11, 0));
        req.vehicle_id = 0;
        let err = svc.create(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "vehicleId", .. }));
    }

    #[tokio::test]
    async fn cancelling_twice_is_not_found() {
        let seed = seed().await;
        let svc = service(&seed);

        let r = svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        svc.cancel(r.id).await.unwrap();

        assert_eq!(
            svc.cancel(r.id).await.unwrap_err(),
            DomainError::NotFound(NOT_CANCELLABLE.into())
        );
        assert_eq!(
            svc.cancel(4242).await.unwrap_err(),
            DomainError::NotFound(NOT_CANCELLABLE.into())
        );
    }

    #[tokio::test]
    async fn cancelled_window_can_be_booked_again() {
        let seed = seed().await;
        let svc = service(&seed);

        let r = svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
        svc.cancel(r.id).await.unwrap();
        svc.create(request(&seed, (10, 0), (11, 0))).await.unwrap();
    }

    #[tokio::test]
    async fn failed_slot_write_persists_nothing() {
        let seed = seed().await;
        let svc = service(&seed);
        seed.store.fail_slot_updates(true);

        let err = svc
            .create(request(&seed, (10, 0), (11, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Operation(_)));

        seed.store.fail_slot_updates(false);
        assert!(svc.list_by_user(seed.user_id).await.unwrap().is_empty());
        assert!(seed.slot_available().await);
    }

    #[tokio::test]
    async fn listing_for_unknown_user_is_not_found() {
        let seed = seed().await;
        let svc = service(&seed);
        assert!(matches!(
            svc.list_by_user(77).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_overlapping_requests_admit_exactly_one() {
        let seed = seed().await;
        let svc = Arc::new(service(&seed));

        let handles: Vec<_> = [((10, 0), (11, 0)), ((10, 30), (11, 30))]
            .into_iter()
            .map(|(start, end)| {
                let svc = svc.clone();
                let req = request(&seed, start, end);
                tokio::spawn(async move { svc.create(req).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((created, conflicts), (1, 1));
        assert_eq!(svc.list_by_user(seed.user_id).await.unwrap().len(), 1);
    }
}
