//! Create vehicles table

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
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicles::VehicleType)
                            .string_len(20)
                            .not_null()
                            .default("car"),
                    )
                    .col(ColumnDef::new(Vehicles::PlateNumber).string().not_null())
                    .col(ColumnDef::new(Vehicles::Color).string().not_null())
                    .col(ColumnDef::new(Vehicles::Model).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_user")
                            .from(Vehicles::Table, Vehicles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_user")
                    .table(Vehicles::Table)
                    .col(Vehicles::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    UserId,
    VehicleType,
    PlateNumber,
    Color,
    Model,
    CreatedAt,
}
