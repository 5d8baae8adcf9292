//! Create parkings table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parkings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parkings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parkings::OwnerId).integer().not_null())
                    .col(ColumnDef::new(Parkings::Name).string().not_null())
                    .col(ColumnDef::new(Parkings::Address).string().not_null())
                    .col(
                        ColumnDef::new(Parkings::IsOpen)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Parkings::TotalCapacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Parkings::HourlyRate)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Parkings::Latitude).decimal_len(10, 7).not_null())
                    .col(ColumnDef::new(Parkings::Longitude).decimal_len(10, 7).not_null())
                    .col(
                        ColumnDef::new(Parkings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parkings_owner")
                            .from(Parkings::Table, Parkings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parkings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Parkings {
    Table,
    Id,
    OwnerId,
    Name,
    Address,
    IsOpen,
    TotalCapacity,
    HourlyRate,
    Latitude,
    Longitude,
    CreatedAt,
}
