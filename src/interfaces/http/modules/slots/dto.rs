//! Slot DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{NewSlot, Slot, SlotChanges, SlotType};

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSlotRequest {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub parking_id: i32,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[serde(rename = "type", default)]
    pub slot_type: SlotType,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl From<AddSlotRequest> for NewSlot {
    fn from(r: AddSlotRequest) -> Self {
        NewSlot {
            parking_id: r.parking_id,
            code: r.code,
            slot_type: r.slot_type,
            is_available: r.is_available,
        }
    }
}

/// `isAvailable` is not accepted here; it belongs to reservations and
/// check-ins.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSlotRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub slot_type: Option<SlotType>,
}

impl From<UpdateSlotRequest> for SlotChanges {
    fn from(r: UpdateSlotRequest) -> Self {
        SlotChanges {
            code: r.code,
            slot_type: r.slot_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub id: i32,
    pub parking_id: i32,
    pub code: String,
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Slot> for SlotDto {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            parking_id: s.parking_id,
            code: s.code,
            slot_type: s.slot_type,
            is_available: s.is_available,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
