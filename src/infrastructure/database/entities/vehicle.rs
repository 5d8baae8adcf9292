//! Vehicle entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::directory as domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VehicleType {
    #[sea_orm(string_value = "car")]
    Car,
    #[sea_orm(string_value = "motorcycle")]
    Motorcycle,
    #[sea_orm(string_value = "truck")]
    Truck,
}

impl From<VehicleType> for domain::VehicleType {
    fn from(t: VehicleType) -> Self {
        match t {
            VehicleType::Car => Self::Car,
            VehicleType::Motorcycle => Self::Motorcycle,
            VehicleType::Truck => Self::Truck,
        }
    }
}

impl From<domain::VehicleType> for VehicleType {
    fn from(t: domain::VehicleType) -> Self {
        match t {
            domain::VehicleType::Car => Self::Car,
            domain::VehicleType::Motorcycle => Self::Motorcycle,
            domain::VehicleType::Truck => Self::Truck,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub vehicle_type: VehicleType,
    pub plate_number: String,
    pub color: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::checkin::Entity")]
    Checkins,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::checkin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checkins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
