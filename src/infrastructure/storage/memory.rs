//! In-memory storage implementation
//!
//! All tables live behind one async mutex. A transaction holds the lock for
//! its whole lifetime and works on a copy of the tables, which replaces the
//! shared state on commit. Dropping the transaction discards the copy.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    Checkin, CheckinRepository, DirectoryRepository, DomainError, DomainResult, NewCheckin,
    NewParking, NewReservation, NewSlot, NewUser, NewVehicle, Parking, RepositoryProvider,
    Reservation, ReservationRepository, ReservationStatus, Slot, SlotRepository,
    SlotTransaction, UnitOfWork, User, Vehicle,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    vehicles: BTreeMap<i32, Vehicle>,
    parkings: BTreeMap<i32, Parking>,
    slots: BTreeMap<i32, Slot>,
    reservations: BTreeMap<i32, Reservation>,
    checkins: BTreeMap<i32, Checkin>,
}

fn next_id<T>(table: &BTreeMap<i32, T>) -> i32 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

/// In-memory storage for development and testing
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_slot_updates: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            fail_slot_updates: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every availability write fail until switched back off.
    /// Used to exercise the rollback path of the dual writes.
    pub fn fail_slot_updates(&self, fail: bool) {
        self.fail_slot_updates.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn slots(&self) -> &dyn SlotRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn checkins(&self) -> &dyn CheckinRepository {
        self
    }

    fn directory(&self) -> &dyn DirectoryRepository {
        self
    }

    fn unit_of_work(&self) -> &dyn UnitOfWork {
        self
    }
}

// ── Repositories ────────────────────────────────────────────────

#[async_trait]
impl SlotRepository for InMemoryStore {
    async fn create(&self, new: NewSlot) -> DomainResult<Slot> {
        let mut t = self.tables.lock().await;
        if !t.parkings.contains_key(&new.parking_id) {
            return Err(DomainError::not_found("Parking", new.parking_id));
        }
        let now = Utc::now();
        let slot = Slot {
            id: next_id(&t.slots),
            parking_id: new.parking_id,
            code: new.code,
            slot_type: new.slot_type,
            is_available: new.is_available,
            created_at: now,
            updated_at: now,
        };
        t.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Slot>> {
        Ok(self.tables.lock().await.slots.get(&id).cloned())
    }

    async fn find_by_parking(&self, parking_id: i32) -> DomainResult<Vec<Slot>> {
        let t = self.tables.lock().await;
        Ok(t.slots
            .values()
            .filter(|s| s.parking_id == parking_id)
            .cloned()
            .collect())
    }

    async fn update(&self, slot: Slot) -> DomainResult<Slot> {
        let mut t = self.tables.lock().await;
        let existing = t
            .slots
            .get_mut(&slot.id)
            .ok_or_else(|| DomainError::not_found("Slot", slot.id))?;
        existing.code = slot.code;
        existing.slot_type = slot.slot_type;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let mut t = self.tables.lock().await;
        t.slots
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Slot", id))?;
        t.reservations.retain(|_, r| r.slot_id != id);
        t.checkins.retain(|_, c| c.slot_id != id);
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.tables.lock().await.reservations.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let t = self.tables.lock().await;
        Ok(t.reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CheckinRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Checkin>> {
        Ok(self.tables.lock().await.checkins.get(&id).cloned())
    }

    async fn find_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Checkin>> {
        let t = self.tables.lock().await;
        Ok(t.checkins
            .values()
            .filter(|c| c.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryStore {
    async fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let mut t = self.tables.lock().await;
        let user = User {
            id: next_id(&t.users),
            full_name: new.full_name,
            email: new.email,
            phone_number: new.phone_number,
            role: new.role,
            created_at: Utc::now(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        Ok(self.tables.lock().await.users.values().cloned().collect())
    }

    async fn update_user(&self, user: User) -> DomainResult<User> {
        let mut t = self.tables.lock().await;
        let existing = t
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("User", user.id))?;
        existing.full_name = user.full_name;
        existing.email = user.email;
        existing.phone_number = user.phone_number;
        existing.role = user.role;
        Ok(existing.clone())
    }

    async fn delete_user(&self, id: i32) -> DomainResult<()> {
        let mut t = self.tables.lock().await;
        t.users
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let vehicle_ids: Vec<i32> = t
            .vehicles
            .values()
            .filter(|v| v.user_id == id)
            .map(|v| v.id)
            .collect();
        let parking_ids: Vec<i32> = t
            .parkings
            .values()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .collect();
        let slot_ids: Vec<i32> = t
            .slots
            .values()
            .filter(|s| parking_ids.contains(&s.parking_id))
            .map(|s| s.id)
            .collect();

        t.reservations.retain(|_, r| {
            r.user_id != id
                && !vehicle_ids.contains(&r.vehicle_id)
                && !slot_ids.contains(&r.slot_id)
        });
        t.checkins.retain(|_, c| {
            !vehicle_ids.contains(&c.vehicle_id) && !slot_ids.contains(&c.slot_id)
        });
        t.slots.retain(|sid, _| !slot_ids.contains(sid));
        t.parkings.retain(|_, p| p.owner_id != id);
        t.vehicles.retain(|_, v| v.user_id != id);
        Ok(())
    }

    async fn create_vehicle(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let mut t = self.tables.lock().await;
        if !t.users.contains_key(&new.user_id) {
            return Err(DomainError::not_found("User", new.user_id));
        }
        let vehicle = Vehicle {
            id: next_id(&t.vehicles),
            user_id: new.user_id,
            vehicle_type: new.vehicle_type,
            plate_number: new.plate_number,
            color: new.color,
            model: new.model,
            created_at: Utc::now(),
        };
        t.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_vehicle(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.tables.lock().await.vehicles.get(&id).cloned())
    }

    async fn find_vehicles_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        let t = self.tables.lock().await;
        Ok(t.vehicles
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_vehicle(&self, vehicle: Vehicle) -> DomainResult<Vehicle> {
        let mut t = self.tables.lock().await;
        let existing = t
            .vehicles
            .get_mut(&vehicle.id)
            .ok_or_else(|| DomainError::not_found("Vehicle", vehicle.id))?;
        existing.vehicle_type = vehicle.vehicle_type;
        existing.plate_number = vehicle.plate_number;
        existing.color = vehicle.color;
        existing.model = vehicle.model;
        Ok(existing.clone())
    }

    async fn delete_vehicle(&self, id: i32) -> DomainResult<()> {
        let mut t = self.tables.lock().await;
        t.vehicles
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;
        t.reservations.retain(|_, r| r.vehicle_id != id);
        t.checkins.retain(|_, c| c.vehicle_id != id);
        Ok(())
    }

    async fn create_parking(&self, new: NewParking) -> DomainResult<Parking> {
        let mut t = self.tables.lock().await;
        if !t.users.contains_key(&new.owner_id) {
            return Err(DomainError::not_found("User", new.owner_id));
        }
        let parking = Parking {
            id: next_id(&t.parkings),
            owner_id: new.owner_id,
            name: new.name,
            address: new.address,
            is_open: new.is_open,
            total_capacity: new.total_capacity,
            hourly_rate: new.hourly_rate,
            latitude: new.latitude,
            longitude: new.longitude,
            created_at: Utc::now(),
        };
        t.parkings.insert(parking.id, parking.clone());
        Ok(parking)
    }

    async fn find_parking(&self, id: i32) -> DomainResult<Option<Parking>> {
        Ok(self.tables.lock().await.parkings.get(&id).cloned())
    }

    async fn update_parking(&self, parking: Parking) -> DomainResult<Parking> {
        let mut t = self.tables.lock().await;
        let existing = t
            .parkings
            .get_mut(&parking.id)
            .ok_or_else(|| DomainError::not_found("Parking", parking.id))?;
        let owner_id = existing.owner_id;
        let created_at = existing.created_at;
        *existing = Parking {
            owner_id,
            created_at,
            ..parking
        };
        Ok(existing.clone())
    }

    async fn delete_parking(&self, id: i32) -> DomainResult<()> {
        let mut t = self.tables.lock().await;
        t.parkings
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Parking", id))?;
        let slot_ids: Vec<i32> = t
            .slots
            .values()
            .filter(|s| s.parking_id == id)
            .map(|s| s.id)
            .collect();
        t.reservations.retain(|_, r| !slot_ids.contains(&r.slot_id));
        t.checkins.retain(|_, c| !slot_ids.contains(&c.slot_id));
        t.slots.retain(|_, s| s.parking_id != id);
        Ok(())
    }
}

// ── Unit of work ────────────────────────────────────────────────

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn begin(&self) -> DomainResult<Box<dyn SlotTransaction>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            fail_slot_updates: self.fail_slot_updates.load(Ordering::SeqCst),
        }))
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
    fail_slot_updates: bool,
}

#[async_trait]
impl SlotTransaction for MemoryTransaction {
    async fn user_exists(&mut self, user_id: i32) -> DomainResult<bool> {
        Ok(self.working.users.contains_key(&user_id))
    }

    async fn vehicle_exists(&mut self, vehicle_id: i32) -> DomainResult<bool> {
        Ok(self.working.vehicles.contains_key(&vehicle_id))
    }

    async fn lock_slot(&mut self, slot_id: i32) -> DomainResult<Option<Slot>> {
        Ok(self.working.slots.get(&slot_id).cloned())
    }

    async fn reserved_for_slot(&mut self, slot_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .working
            .reservations
            .values()
            .filter(|r| r.slot_id == slot_id && r.status == ReservationStatus::Reserved)
            .cloned()
            .collect())
    }

    async fn find_reservation(&mut self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.working.reservations.get(&id).cloned())
    }

    async fn insert_reservation(&mut self, new: NewReservation) -> DomainResult<Reservation> {
        let now = Utc::now();
        let reservation = Reservation {
            id: next_id(&self.working.reservations),
            user_id: new.user_id,
            vehicle_id: new.vehicle_id,
            slot_id: new.slot_id,
            start_time: new.start_time,
            end_time: new.end_time,
            status: ReservationStatus::Reserved,
            created_at: now,
            updated_at: now,
        };
        self.working
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn set_reservation_status(
        &mut self,
        id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Reservation> {
        let reservation = self
            .working
            .reservations
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn find_checkin(&mut self, id: i32) -> DomainResult<Option<Checkin>> {
        Ok(self.working.checkins.get(&id).cloned())
    }

    async fn find_checkin_at(
        &mut self,
        vehicle_id: i32,
        slot_id: i32,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<Option<Checkin>> {
        Ok(self
            .working
            .checkins
            .values()
            .find(|c| {
                c.vehicle_id == vehicle_id && c.slot_id == slot_id && c.entry_time == entry_time
            })
            .cloned())
    }

    async fn insert_checkin(&mut self, new: NewCheckin) -> DomainResult<Checkin> {
        let now = Utc::now();
        let checkin = Checkin {
            id: next_id(&self.working.checkins),
            vehicle_id: new.vehicle_id,
            slot_id: new.slot_id,
            entry_time: new.entry_time,
            exit_time: None,
            over_stay_fine: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        self.working.checkins.insert(checkin.id, checkin.clone());
        Ok(checkin)
    }

    async fn close_checkin(
        &mut self,
        id: i32,
        exit_time: DateTime<Utc>,
        over_stay_fine: Decimal,
    ) -> DomainResult<Checkin> {
        let checkin = self
            .working
            .checkins
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Check-in", id))?;
        checkin.exit_time = Some(exit_time);
        checkin.over_stay_fine = over_stay_fine;
        checkin.updated_at = Utc::now();
        Ok(checkin.clone())
    }

    async fn set_slot_availability(
        &mut self,
        slot_id: i32,
        is_available: bool,
    ) -> DomainResult<()> {
        if self.fail_slot_updates {
            return Err(DomainError::Storage("slot update rejected".into()));
        }
        let slot = self
            .working
            .slots
            .get_mut(&slot_id)
            .ok_or_else(|| DomainError::not_found("Slot", slot_id))?;
        slot.is_available = is_available;
        slot.updated_at = Utc::now();
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let MemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SlotType, UserRole};

    async fn seeded() -> (InMemoryStore, Slot) {
        let store = InMemoryStore::new();
        let owner = store
            .create_user(NewUser {
                full_name: "Owner".into(),
                email: "owner@example.com".into(),
                phone_number: "09120000000".into(),
                role: UserRole::Owner,
            })
            .await
            .unwrap();
        let parking = store
            .create_parking(NewParking {
                owner_id: owner.id,
                name: "Central".into(),
                address: "1 Main St".into(),
                is_open: true,
                total_capacity: 10,
                hourly_rate: Decimal::from(5),
                latitude: Decimal::ZERO,
                longitude: Decimal::ZERO,
            })
            .await
            .unwrap();
        let slot = SlotRepository::create(
            &store,
            NewSlot {
                parking_id: parking.id,
                code: "A-01".into(),
                slot_type: SlotType::Normal,
                is_available: true,
            },
        )
        .await
        .unwrap();
        (store, slot)
    }

    #[tokio::test]
    async fn uncommitted_transaction_is_discarded() {
        let (store, slot) = seeded().await;

        let mut tx = store.begin().await.unwrap();
        tx.set_slot_availability(slot.id, false).await.unwrap();
        drop(tx);

        let slot = SlotRepository::find_by_id(&store, slot.id).await.unwrap().unwrap();
        assert!(slot.is_available);
    }

    #[tokio::test]
    async fn committed_transaction_is_visible() {
        let (store, slot) = seeded().await;

        let mut tx = store.begin().await.unwrap();
        tx.set_slot_availability(slot.id, false).await.unwrap();
        tx.commit().await.unwrap();

        let slot = SlotRepository::find_by_id(&store, slot.id).await.unwrap().unwrap();
        assert!(!slot.is_available);
    }

    #[tokio::test]
    async fn slot_creation_requires_parking() {
        let store = InMemoryStore::new();
        let err = SlotRepository::create(
            &store,
            NewSlot {
                parking_id: 42,
                code: "X".into(),
                slot_type: SlotType::Vip,
                is_available: true,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn failing_slot_updates_are_reported() {
        let (store, slot) = seeded().await;
        store.fail_slot_updates(true);

        let mut tx = store.begin().await.unwrap();
        assert!(tx.set_slot_availability(slot.id, false).await.is_err());
    }
}
