//! SeaORM implementation of UnitOfWork
//!
//! Every `SlotTransaction` wraps one `DatabaseTransaction`. Dropping it
//! without `commit` rolls the transaction back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::checkin_repository::model_to_domain as checkin_to_domain;
use super::db_err;
use super::reservation_repository::model_to_domain as reservation_to_domain;
use super::slot_repository::model_to_domain as slot_to_domain;
use crate::domain::checkin::{Checkin, NewCheckin};
use crate::domain::repositories::{SlotTransaction, UnitOfWork};
use crate::domain::reservation::{NewReservation, Reservation, ReservationStatus};
use crate::domain::slot::Slot;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{checkin, reservation, slot, user, vehicle};

pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn SlotTransaction>> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(Box::new(SeaOrmSlotTransaction { txn }))
    }
}

struct SeaOrmSlotTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl SlotTransaction for SeaOrmSlotTransaction {
    async fn user_exists(&mut self, user_id: i32) -> DomainResult<bool> {
        let found = user::Entity::find_by_id(user_id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }

    async fn vehicle_exists(&mut self, vehicle_id: i32) -> DomainResult<bool> {
        let found = vehicle::Entity::find_by_id(vehicle_id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }

    async fn lock_slot(&mut self, slot_id: i32) -> DomainResult<Option<Slot>> {
        // FOR UPDATE where supported; SQLite serializes writers on its own
        let model = slot::Entity::find_by_id(slot_id)
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(slot_to_domain))
    }

    async fn reserved_for_slot(&mut self, slot_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::SlotId.eq(slot_id))
            .filter(reservation::Column::Status.eq(reservation::ReservationStatus::Reserved))
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(reservation_to_domain).collect())
    }

    async fn find_reservation(&mut self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(reservation_to_domain))
    }

    async fn insert_reservation(&mut self, new: NewReservation) -> DomainResult<Reservation> {
        let now = Utc::now();
        let model = reservation::ActiveModel {
            user_id: Set(new.user_id),
            vehicle_id: Set(new.vehicle_id),
            slot_id: Set(new.slot_id),
            start_time: Set(new.start_time),
            end_time: Set(new.end_time),
            status: Set(reservation::ReservationStatus::Reserved),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&self.txn).await.map_err(db_err)?;
        debug!(reservation_id = saved.id, slot_id = saved.slot_id, "Reservation row inserted");
        Ok(reservation_to_domain(saved))
    }

    async fn set_reservation_status(
        &mut self,
        id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Reservation> {
        let existing = reservation::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;

        let mut model = existing.into_active_model();
        model.status = Set(status.into());
        model.updated_at = Set(Utc::now());
        let saved = model.update(&self.txn).await.map_err(db_err)?;
        Ok(reservation_to_domain(saved))
    }

    async fn find_checkin(&mut self, id: i32) -> DomainResult<Option<Checkin>> {
        let model = checkin::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(checkin_to_domain))
    }

    async fn find_checkin_at(
        &mut self,
        vehicle_id: i32,
        slot_id: i32,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<Option<Checkin>> {
        let model = checkin::Entity::find()
            .filter(checkin::Column::VehicleId.eq(vehicle_id))
            .filter(checkin::Column::SlotId.eq(slot_id))
            .filter(checkin::Column::EntryTime.eq(entry_time))
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(checkin_to_domain))
    }

    async fn insert_checkin(&mut self, new: NewCheckin) -> DomainResult<Checkin> {
        let now = Utc::now();
        let model = checkin::ActiveModel {
            vehicle_id: Set(new.vehicle_id),
            slot_id: Set(new.slot_id),
            entry_time: Set(new.entry_time),
            exit_time: Set(None),
            over_stay_fine: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&self.txn).await.map_err(db_err)?;
        debug!(checkin_id = saved.id, slot_id = saved.slot_id, "Check-in row inserted");
        Ok(checkin_to_domain(saved))
    }

    async fn close_checkin(
        &mut self,
        id: i32,
        exit_time: DateTime<Utc>,
        over_stay_fine: Decimal,
    ) -> DomainResult<Checkin> {
        let existing = checkin::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Check-in", id))?;

        let mut model = existing.into_active_model();
        model.exit_time = Set(Some(exit_time));
        model.over_stay_fine = Set(over_stay_fine);
        model.updated_at = Set(Utc::now());
        let saved = model.update(&self.txn).await.map_err(db_err)?;
        Ok(checkin_to_domain(saved))
    }

    async fn set_slot_availability(
        &mut self,
        slot_id: i32,
        is_available: bool,
    ) -> DomainResult<()> {
        let result = slot::Entity::update_many()
            .col_expr(slot::Column::IsAvailable, Expr::value(is_available))
            .col_expr(slot::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(slot::Column::Id.eq(slot_id))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Slot", slot_id));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.txn.commit().await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::{NewParking, NewUser, NewVehicle, UserRole, VehicleType};
    use crate::domain::slot::{NewSlot, SlotType};
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};

    struct Fixture {
        repos: SeaOrmRepositoryProvider,
        user_id: i32,
        vehicle_id: i32,
        slot_id: i32,
    }

    async fn fixture() -> Fixture {
        fixture_at("sqlite::memory:").await
    }

    async fn fixture_at(url: &str) -> Fixture {
        let config = DatabaseConfig {
            url: url.into(),
            max_connections: None,
        };
        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();
        let repos = SeaOrmRepositoryProvider::new(db);

        let user = repos
            .directory()
            .create_user(NewUser {
                full_name: "Sara Ahmadi".into(),
                email: "sara@example.com".into(),
                phone_number: "09121234567".into(),
                role: UserRole::Customer,
            })
            .await
            .unwrap();
        let vehicle = repos
            .directory()
            .create_vehicle(NewVehicle {
                user_id: user.id,
                vehicle_type: VehicleType::Car,
                plate_number: "12B345".into(),
                color: "white".into(),
                model: "Pride".into(),
            })
            .await
            .unwrap();
        let parking = repos
            .directory()
            .create_parking(NewParking {
                owner_id: user.id,
                name: "Central".into(),
                address: "Valiasr St".into(),
                is_open: true,
                total_capacity: 20,
                hourly_rate: Decimal::from(15),
                latitude: Decimal::new(357000000, 7),
                longitude: Decimal::new(514000000, 7),
            })
            .await
            .unwrap();
        let slot = repos
            .slots()
            .create(NewSlot {
                parking_id: parking.id,
                code: "A-01".into(),
                slot_type: SlotType::Vip,
                is_available: true,
            })
            .await
            .unwrap();

        Fixture {
            repos,
            user_id: user.id,
            vehicle_id: vehicle.id,
            slot_id: slot.id,
        }
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = "2025-01-10T10:00:00Z".parse().unwrap();
        let end = "2025-01-10T12:00:00Z".parse().unwrap();
        (start, end)
    }

    #[tokio::test]
    async fn committed_reservation_is_visible() {
        let f = fixture().await;
        let (start, end) = window();

        let mut tx = f.repos.unit_of_work().begin().await.unwrap();
        let slot = tx.lock_slot(f.slot_id).await.unwrap().unwrap();
        assert_eq!(slot.slot_type, SlotType::Vip);
        let created = tx
            .insert_reservation(NewReservation {
                user_id: f.user_id,
                vehicle_id: f.vehicle_id,
                slot_id: f.slot_id,
                start_time: start,
                end_time: end,
            })
            .await
            .unwrap();
        tx.set_slot_availability(f.slot_id, false).await.unwrap();
        tx.commit().await.unwrap();

        let stored = f
            .repos
            .reservations()
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Reserved);
        assert_eq!(stored.start_time, start);

        let slot = f.repos.slots().find_by_id(f.slot_id).await.unwrap().unwrap();
        assert!(!slot.is_available);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let f = fixture().await;
        let (start, end) = window();

        {
            let mut tx = f.repos.unit_of_work().begin().await.unwrap();
            tx.insert_reservation(NewReservation {
                user_id: f.user_id,
                vehicle_id: f.vehicle_id,
                slot_id: f.slot_id,
                start_time: start,
                end_time: end,
            })
            .await
            .unwrap();
            tx.set_slot_availability(f.slot_id, false).await.unwrap();
        }

        let rows = f.repos.reservations().find_by_user(f.user_id).await.unwrap();
        assert!(rows.is_empty());
        let slot = f.repos.slots().find_by_id(f.slot_id).await.unwrap().unwrap();
        assert!(slot.is_available);
    }

    #[tokio::test]
    async fn availability_on_missing_slot_is_not_found() {
        let f = fixture().await;
        let mut tx = f.repos.unit_of_work().begin().await.unwrap();
        let err = tx.set_slot_availability(999, true).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn checkin_close_records_exit_and_fine() {
        let f = fixture().await;
        let (entry, exit) = window();

        let mut tx = f.repos.unit_of_work().begin().await.unwrap();
        let open = tx
            .insert_checkin(NewCheckin {
                vehicle_id: f.vehicle_id,
                slot_id: f.slot_id,
                entry_time: entry,
            })
            .await
            .unwrap();
        assert!(open.is_open());
        let found = tx
            .find_checkin_at(f.vehicle_id, f.slot_id, entry)
            .await
            .unwrap();
        assert_eq!(found.map(|c| c.id), Some(open.id));

        let closed = tx
            .close_checkin(open.id, exit, Decimal::from(10))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(closed.exit_time, Some(exit));
        let listed = f.repos.checkins().find_by_vehicle(f.vehicle_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].over_stay_fine, Decimal::from(10));
    }

    #[tokio::test]
    async fn deleting_slot_removes_its_reservations() {
        let f = fixture().await;
        let (start, end) = window();

        let mut tx = f.repos.unit_of_work().begin().await.unwrap();
        tx.insert_reservation(NewReservation {
            user_id: f.user_id,
            vehicle_id: f.vehicle_id,
            slot_id: f.slot_id,
            start_time: start,
            end_time: end,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        f.repos.slots().delete(f.slot_id).await.unwrap();
        assert!(f.repos.slots().find_by_id(f.slot_id).await.unwrap().is_none());
        assert!(f
            .repos
            .reservations()
            .find_by_user(f.user_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_overlapping_reservations_on_sqlite_file_admit_one() {
        use std::sync::Arc;

        use crate::application::{ReservationService, SlotLocks};

        let path = std::env::temp_dir().join(format!("parking-{}.db", uuid::Uuid::new_v4()));
        let f = fixture_at(&format!("sqlite://{}?mode=rwc", path.display())).await;
        let (user_id, vehicle_id, slot_id) = (f.user_id, f.vehicle_id, f.slot_id);
        let repos: Arc<dyn RepositoryProvider> = Arc::new(f.repos);
        let svc = Arc::new(ReservationService::new(
            repos.clone(),
            Arc::new(SlotLocks::new()),
        ));

        let windows = [
            ("2025-01-10T10:00:00Z", "2025-01-10T11:00:00Z"),
            ("2025-01-10T10:30:00Z", "2025-01-10T11:30:00Z"),
            ("2025-01-10T09:00:00Z", "2025-01-10T12:00:00Z"),
        ];
        let handles: Vec<_> = windows
            .into_iter()
            .map(|(start, end)| {
                let svc = svc.clone();
                let req = NewReservation {
                    user_id,
                    vehicle_id,
                    slot_id,
                    start_time: start.parse().unwrap(),
                    end_time: end.parse().unwrap(),
                };
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
        assert_eq!((created, conflicts), (1, 2));

        let stored = repos.reservations().find_by_user(user_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        let slot = repos.slots().find_by_id(slot_id).await.unwrap().unwrap();
        assert!(!slot.is_available);

        drop(svc);
        drop(repos);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn deleting_a_user_removes_everything_it_owns() {
        let f = fixture().await;
        let (start, end) = window();

        let mut tx = f.repos.unit_of_work().begin().await.unwrap();
        tx.insert_reservation(NewReservation {
            user_id: f.user_id,
            vehicle_id: f.vehicle_id,
            slot_id: f.slot_id,
            start_time: start,
            end_time: end,
        })
        .await
        .unwrap();
        tx.insert_checkin(NewCheckin {
            vehicle_id: f.vehicle_id,
            slot_id: f.slot_id,
            entry_time: start,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let slot = f.repos.slots().find_by_id(f.slot_id).await.unwrap().unwrap();
        f.repos.directory().delete_user(f.user_id).await.unwrap();

        let directory = f.repos.directory();
        assert!(directory.find_user(f.user_id).await.unwrap().is_none());
        assert!(directory.find_vehicle(f.vehicle_id).await.unwrap().is_none());
        assert!(directory.find_parking(slot.parking_id).await.unwrap().is_none());
        assert!(f.repos.slots().find_by_id(f.slot_id).await.unwrap().is_none());
        assert!(f.repos.reservations().find_by_user(f.user_id).await.unwrap().is_empty());
        assert!(f.repos.checkins().find_by_vehicle(f.vehicle_id).await.unwrap().is_empty());

        let err = directory.delete_user(f.user_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn vehicle_and_parking_updates_persist() {
        let f = fixture().await;
        let directory = f.repos.directory();

        let mut vehicle = directory.find_vehicle(f.vehicle_id).await.unwrap().unwrap();
        vehicle.color = "black".into();
        directory.update_vehicle(vehicle).await.unwrap();
        let listed = directory.find_vehicles_by_user(f.user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].color, "black");

        let slot = f.repos.slots().find_by_id(f.slot_id).await.unwrap().unwrap();
        let mut parking = directory.find_parking(slot.parking_id).await.unwrap().unwrap();
        parking.is_open = false;
        parking.hourly_rate = Decimal::new(125, 1);
        let saved = directory.update_parking(parking).await.unwrap();
        assert!(!saved.is_open);
        assert_eq!(saved.hourly_rate, Decimal::new(125, 1));

        directory.delete_parking(slot.parking_id).await.unwrap();
        assert!(f.repos.slots().find_by_id(f.slot_id).await.unwrap().is_none());
        assert!(directory.find_user(f.user_id).await.unwrap().is_some());
    }
}
