//! Parking slot entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::slot as domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum SlotType {
    #[sea_orm(string_value = "normal")]
    Normal,
    #[sea_orm(string_value = "VIP")]
    Vip,
    #[sea_orm(string_value = "disabled")]
    Disabled,
}

impl From<SlotType> for domain::SlotType {
    fn from(t: SlotType) -> Self {
        match t {
            SlotType::Normal => Self::Normal,
            SlotType::Vip => Self::Vip,
            SlotType::Disabled => Self::Disabled,
        }
    }
}

impl From<domain::SlotType> for SlotType {
    fn from(t: domain::SlotType) -> Self {
        match t {
            domain::SlotType::Normal => Self::Normal,
            domain::SlotType::Vip => Self::Vip,
            domain::SlotType::Disabled => Self::Disabled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub parking_id: i32,
    pub code: String,
    pub slot_type: SlotType,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking::Entity",
        from = "Column::ParkingId",
        to = "super::parking::Column::Id"
    )]
    Parking,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
    #[sea_orm(has_many = "super::checkin::Entity")]
    Checkins,
}

impl Related<super::parking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parking.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::checkin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checkins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
