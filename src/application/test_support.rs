//! Seeded in-memory fixtures shared by the service tests

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    DirectoryRepository, NewParking, NewSlot, NewUser, NewVehicle, RepositoryProvider,
    SlotRepository, SlotType, UserRole, VehicleType,
};
use crate::infrastructure::InMemoryStore;

use super::SlotLocks;

pub struct Seed {
    pub store: Arc<InMemoryStore>,
    pub locks: Arc<SlotLocks>,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub parking_id: i32,
    pub slot_id: i32,
}

impl Seed {
    pub fn repos(&self) -> Arc<dyn RepositoryProvider> {
        self.store.clone()
    }

    pub async fn slot_available(&self) -> bool {
        self.store
            .slots()
            .find_by_id(self.slot_id)
            .await
            .unwrap()
            .unwrap()
            .is_available
    }
}

pub async fn seed() -> Seed {
    let store = Arc::new(InMemoryStore::new());
    let user = store
        .create_user(NewUser {
            full_name: "Reza Karimi".into(),
            email: "reza@example.com".into(),
            phone_number: "09121111111".into(),
            role: UserRole::Customer,
        })
        .await
        .unwrap();
    let vehicle = store
        .create_vehicle(NewVehicle {
            user_id: user.id,
            vehicle_type: VehicleType::Car,
            plate_number: "22D444".into(),
            color: "black".into(),
            model: "Peugeot 206".into(),
        })
        .await
        .unwrap();
    let parking = store
        .create_parking(NewParking {
            owner_id: user.id,
            name: "North Lot".into(),
            address: "Enghelab Sq".into(),
            is_open: true,
            total_capacity: 5,
            hourly_rate: Decimal::from(20),
            latitude: Decimal::ZERO,
            longitude: Decimal::ZERO,
        })
        .await
        .unwrap();
    let slot = SlotRepository::create(
        store.as_ref(),
        NewSlot {
            parking_id: parking.id,
            code: "B-12".into(),
            slot_type: SlotType::Normal,
            is_available: true,
        },
    )
    .await
    .unwrap();

    Seed {
        store,
        locks: Arc::new(SlotLocks::new()),
        user_id: user.id,
        vehicle_id: vehicle.id,
        parking_id: parking.id,
        slot_id: slot.id,
    }
}

/// 2025-03-01 at `h:m` UTC
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap()
}
