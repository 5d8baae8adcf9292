//! Create checkins table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_vehicles::Vehicles;
use super::m20240101_000004_create_parking_slots::ParkingSlots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Checkins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Checkins::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Checkins::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Checkins::SlotId).integer().not_null())
                    .col(
                        ColumnDef::new(Checkins::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Checkins::ExitTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Checkins::OverStayFine)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Checkins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Checkins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checkins_vehicle")
                            .from(Checkins::Table, Checkins::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checkins_slot")
                            .from(Checkins::Table, Checkins::SlotId)
                            .to(ParkingSlots::Table, ParkingSlots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checkins_vehicle")
                    .table(Checkins::Table)
                    .col(Checkins::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Checkins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Checkins {
    Table,
    Id,
    VehicleId,
    SlotId,
    EntryTime,
    ExitTime,
    OverStayFine,
    CreatedAt,
    UpdatedAt,
}
