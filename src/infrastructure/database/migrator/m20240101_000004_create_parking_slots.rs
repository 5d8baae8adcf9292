//! Create parking_slots table

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_parkings::Parkings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingSlots::ParkingId).integer().not_null())
                    .col(ColumnDef::new(ParkingSlots::Code).string().not_null())
                    .col(
                        ColumnDef::new(ParkingSlots::SlotType)
                            .string_len(20)
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_slots_parking")
                            .from(ParkingSlots::Table, ParkingSlots::ParkingId)
                            .to(Parkings::Table, Parkings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_slots_parking")
                    .table(ParkingSlots::Table)
                    .col(ParkingSlots::ParkingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingSlots {
    Table,
    Id,
    ParkingId,
    Code,
    SlotType,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}
