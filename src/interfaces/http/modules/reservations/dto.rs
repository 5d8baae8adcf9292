//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{NewReservation, Reservation, ReservationStatus};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub user_id: i32,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub vehicle_id: i32,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub slot_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(r: CreateReservationRequest) -> Self {
        NewReservation {
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            slot_id: r.slot_id,
            start_time: r.start_time,
            end_time: r.end_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub slot_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            slot_id: r.slot_id,
            start_time: r.start_time,
            end_time: r.end_time,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
