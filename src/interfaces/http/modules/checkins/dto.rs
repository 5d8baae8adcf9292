//! Check-in DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Checkin;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub vehicle_id: i32,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub slot_id: i32,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub entry_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub slot_id: i32,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub over_stay_fine: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Checkin> for CheckinDto {
    fn from(c: Checkin) -> Self {
        Self {
            id: c.id,
            vehicle_id: c.vehicle_id,
            slot_id: c.slot_id,
            entry_time: c.entry_time,
            exit_time: c.exit_time,
            over_stay_fine: c.over_stay_fine,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub over_stay_fine: Decimal,
}
