//! Parking slot domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slot category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotType {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "disabled")]
    Disabled,
}

impl SlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Vip => "VIP",
            Self::Disabled => "disabled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "VIP" => Some(Self::Vip),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl Default for SlotType {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical parking space.
///
/// `is_available` is a stored flag. It is flipped by reservation and
/// check-in transitions and is never recomputed from other rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: i32,
    pub parking_id: i32,
    pub code: String,
    pub slot_type: SlotType,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSlot {
    pub parking_id: i32,
    pub code: String,
    pub slot_type: SlotType,
    pub is_available: bool,
}

/// Fields the slot-management collaborator may change after creation.
#[derive(Debug, Clone, Default)]
pub struct SlotChanges {
    pub code: Option<String>,
    pub slot_type: Option<SlotType>,
}

impl SlotChanges {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.slot_type.is_none()
    }

    pub fn apply(self, slot: &mut Slot) {
        if let Some(code) = self.code {
            slot.code = code;
        }
        if let Some(slot_type) = self.slot_type {
            slot.slot_type = slot_type;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_type_uses_persisted_spelling() {
        assert_eq!(SlotType::Vip.as_str(), "VIP");
        assert_eq!(SlotType::parse("VIP"), Some(SlotType::Vip));
        assert_eq!(SlotType::parse("vip"), None);
        assert_eq!(serde_json::to_string(&SlotType::Disabled).unwrap(), "\"disabled\"");
    }

    #[test]
    fn changes_leave_availability_alone() {
        let now = Utc::now();
        let mut slot = Slot {
            id: 1,
            parking_id: 1,
            code: "A-01".into(),
            slot_type: SlotType::Normal,
            is_available: false,
            created_at: now,
            updated_at: now,
        };
        let changes = SlotChanges {
            code: Some("B-07".into()),
            slot_type: Some(SlotType::Vip),
        };
        assert!(!changes.is_empty());
        changes.apply(&mut slot);
        assert_eq!(slot.code, "B-07");
        assert_eq!(slot.slot_type, SlotType::Vip);
        assert!(!slot.is_available);
    }
}
