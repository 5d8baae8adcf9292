//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_vehicles;
mod m20240101_000003_create_parkings;
mod m20240101_000004_create_parking_slots;
mod m20240101_000005_create_reservations;
mod m20240101_000006_create_checkins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_vehicles::Migration),
            Box::new(m20240101_000003_create_parkings::Migration),
            Box::new(m20240101_000004_create_parking_slots::Migration),
            Box::new(m20240101_000005_create_reservations::Migration),
            Box::new(m20240101_000006_create_checkins::Migration),
        ]
    }
}
