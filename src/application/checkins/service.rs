//! Check-in / check-out engine

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::application::SlotLocks;
use crate::domain::{
    Checkin, DomainError, DomainResult, FinePolicy, NewCheckin, RepositoryProvider,
};
use crate::shared::validations::validate_id;

const INVALID_CHECKOUT: &str = "Invalid check-in or already checked out";

fn record_outcome(outcome: &'static str) {
    metrics::counter!("parking_checkins_total", "outcome" => outcome).increment(1);
}

pub struct CheckinService {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLocks>,
    policy: FinePolicy,
}

impl CheckinService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: Arc<SlotLocks>, policy: FinePolicy) -> Self {
        Self {
            repos,
            locks,
            policy,
        }
    }

    pub fn policy(&self) -> &FinePolicy {
        &self.policy
    }

    /// Record a vehicle entering a slot and mark the slot occupied.
    pub async fn check_in(
        &self,
        vehicle_id: i32,
        slot_id: i32,
        entry_time: Option<DateTime<Utc>>,
    ) -> DomainResult<Checkin> {
        validate_id("vehicleId", vehicle_id)?;
        validate_id("slotId", slot_id)?;
        let entry_time = entry_time.unwrap_or_else(Utc::now);

        let _guard = self.locks.acquire(slot_id).await;
        let mut tx = self.repos.unit_of_work().begin().await?;

        if !tx.vehicle_exists(vehicle_id).await? {
            return Err(DomainError::NotFound("Vehicle not found".into()));
        }
        tx.lock_slot(slot_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Slot not found".into()))?;

        if tx
            .find_checkin_at(vehicle_id, slot_id, entry_time)
            .await?
            .is_some()
        {
            record_outcome("duplicate");
            return Err(DomainError::Conflict("Already checked in".into()));
        }

        let checkin = tx
            .insert_checkin(NewCheckin {
                vehicle_id,
                slot_id,
                entry_time,
            })
            .await?;
        if let Err(e) = tx.set_slot_availability(slot_id, false).await {
            warn!(slot_id, error = %e, "Failed to mark slot occupied");
            return Err(e.into_operation("Failed to update slot availability"));
        }
        tx.commit()
            .await
            .map_err(|e| e.into_operation("Failed to commit check-in"))?;

        record_outcome("checked_in");
        info!(
            checkin_id = checkin.id,
            vehicle_id,
            slot_id,
            entry = %checkin.entry_time,
            "Vehicle checked in"
        );
        Ok(checkin)
    }

    /// Close an open check-in, compute the overstay fine and free the slot.
    pub async fn check_out(
        &self,
        checkin_id: i32,
        exit_time: Option<DateTime<Utc>>,
    ) -> DomainResult<Checkin> {
        validate_id("checkinId", checkin_id)?;

        let current = self
            .repos
            .checkins()
            .find_by_id(checkin_id)
            .await?
            .filter(Checkin::is_open)
            .ok_or_else(|| DomainError::validation("checkinId", INVALID_CHECKOUT))?;

        let _guard = self.locks.acquire(current.slot_id).await;
        let mut tx = self.repos.unit_of_work().begin().await?;

        let open = tx
            .find_checkin(checkin_id)
            .await?
            .filter(Checkin::is_open)
            .ok_or_else(|| DomainError::validation("checkinId", INVALID_CHECKOUT))?;

        let exit_time = exit_time.unwrap_or_else(Utc::now);
        if exit_time < open.entry_time {
            return Err(DomainError::validation(
                "exitTime",
                "Exit time must not be before entry time",
            ));
        }

        let fine = self.policy.fine_for(open.entry_time, exit_time);
        let closed = tx.close_checkin(open.id, exit_time, fine).await?;
        if let Err(e) = tx.set_slot_availability(closed.slot_id, true).await {
            warn!(slot_id = closed.slot_id, error = %e, "Failed to release slot");
            return Err(e.into_operation("Failed to update slot availability"));
        }
        tx.commit()
            .await
            .map_err(|e| e.into_operation("Failed to commit check-out"))?;

        record_outcome("checked_out");
        if fine > Decimal::ZERO {
            metrics::counter!("parking_overstay_fines_total").increment(1);
        }
        info!(
            checkin_id,
            slot_id = closed.slot_id,
            over_stay_fine = %fine,
            "Vehicle checked out"
        );
        Ok(closed)
    }

    pub async fn list_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Checkin>> {
        validate_id("vehicleId", vehicle_id)?;
        if self
            .repos
            .directory()
            .find_vehicle(vehicle_id)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound("Vehicle not found".into()));
        }
        self.repos.checkins().find_by_vehicle(vehicle_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{at, seed, Seed};
    use chrono::Duration;

    fn service(seed: &Seed) -> CheckinService {
        CheckinService::new(seed.repos(), seed.locks.clone(), FinePolicy::default())
    }

    async fn fine_after(minutes: i64) -> Decimal {
        let seed = seed().await;
        let svc = service(&seed);
        let entry = at(9, 0);
        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(entry))
            .await
            .unwrap();
        svc.check_out(c.id, Some(entry + Duration::minutes(minutes)))
            .await
            .unwrap()
            .over_stay_fine
    }

    #[tokio::test]
    async fn ninety_minutes_costs_one_hour() {
        assert_eq!(fine_after(90).await, Decimal::from(10));
    }

    #[tokio::test]
    async fn forty_five_minutes_is_free() {
        assert_eq!(fine_after(45).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn slot_flag_follows_checkin_lifecycle() {
        let seed = seed().await;
        let svc = service(&seed);

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        assert!(c.is_open());
        assert_eq!(c.over_stay_fine, Decimal::ZERO);
        assert!(!seed.slot_available().await);

        let closed = svc.check_out(c.id, Some(at(9, 30))).await.unwrap();
        assert_eq!(closed.exit_time, Some(at(9, 30)));
        assert!(seed.slot_available().await);
    }

    #[tokio::test]
    async fn second_checkout_is_rejected() {
        let seed = seed().await;
        let svc = service(&seed);

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        svc.check_out(c.id, Some(at(10, 0))).await.unwrap();

        let err = svc.check_out(c.id, Some(at(11, 0))).await.unwrap_err();
        assert_eq!(err, DomainError::validation("checkinId", INVALID_CHECKOUT));
        let err = svc.check_out(999, None).await.unwrap_err();
        assert_eq!(err, DomainError::validation("checkinId", INVALID_CHECKOUT));
    }

    #[tokio::test]
    async fn identical_entry_is_a_duplicate() {
        let seed = seed().await;
        let svc = service(&seed);

        svc.check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        let err = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict("Already checked in".into()));

        // a different entry time is a new check-in
        svc.check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn exit_before_entry_is_rejected() {
        let seed = seed().await;
        let svc = service(&seed);

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        let err = svc.check_out(c.id, Some(at(8, 0))).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "exitTime", .. }));
        assert!(svc.list_by_vehicle(seed.vehicle_id).await.unwrap()[0].is_open());
    }

    #[tokio::test]
    async fn unknown_vehicle_or_slot_is_not_found() {
        let seed = seed().await;
        let svc = service(&seed);

        assert_eq!(
            svc.check_in(50, 50, None).await.unwrap_err(),
            DomainError::NotFound("Vehicle not found".into())
        );
        assert_eq!(
            svc.check_in(seed.vehicle_id, 50, None).await.unwrap_err(),
            DomainError::NotFound("Slot not found".into())
        );
        assert!(matches!(
            svc.list_by_vehicle(50).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejected_checkins_leave_no_slot_locks() {
        let seed = seed().await;
        let svc = service(&seed);

        for slot_id in 1000..2000 {
            let err = svc
                .check_in(seed.vehicle_id, slot_id, None)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::NotFound(_)));
        }
        assert!(seed.locks.is_empty());

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        svc.check_out(c.id, Some(at(9, 30))).await.unwrap();
        assert!(seed.locks.is_empty());
    }

    #[tokio::test]
    async fn failed_slot_write_keeps_checkin_open() {
        let seed = seed().await;
        let svc = service(&seed);

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        seed.store.fail_slot_updates(true);
        let err = svc.check_out(c.id, Some(at(12, 0))).await.unwrap_err();
        assert!(matches!(err, DomainError::Operation(_)));

        seed.store.fail_slot_updates(false);
        let listed = svc.list_by_vehicle(seed.vehicle_id).await.unwrap();
        assert!(listed[0].is_open());
        assert_eq!(listed[0].over_stay_fine, Decimal::ZERO);
    }

    #[tokio::test]
    async fn configured_policy_is_applied() {
        let seed = seed().await;
        let svc = CheckinService::new(
            seed.repos(),
            seed.locks.clone(),
            FinePolicy::new(30, Decimal::from(25)),
        );

        let c = svc
            .check_in(seed.vehicle_id, seed.slot_id, Some(at(9, 0)))
            .await
            .unwrap();
        let closed = svc.check_out(c.id, Some(at(10, 45))).await.unwrap();
        assert_eq!(closed.over_stay_fine, Decimal::from(50));
    }
}
