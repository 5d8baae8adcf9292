//! User entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::directory as domain;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "owner")]
    Owner,
    #[sea_orm(string_value = "guard")]
    Guard,
}

impl From<UserRole> for domain::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Customer => Self::Customer,
            UserRole::Staff => Self::Staff,
            UserRole::Owner => Self::Owner,
            UserRole::Guard => Self::Guard,
        }
    }
}

impl From<domain::UserRole> for UserRole {
    fn from(role: domain::UserRole) -> Self {
        match role {
            domain::UserRole::Admin => Self::Admin,
            domain::UserRole::Customer => Self::Customer,
            domain::UserRole::Staff => Self::Staff,
            domain::UserRole::Owner => Self::Owner,
            domain::UserRole::Guard => Self::Guard,
        }
    }
}

/// User model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vehicle::Entity")]
    Vehicles,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
