//! Reservation domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Holding the slot for its window
    #[serde(rename = "reserved")]
    Reserved,
    /// Cancelled by the user
    #[serde(rename = "cancelled")]
    Cancelled,
    /// Fulfilled (set by processes outside this service)
    #[serde(rename = "completed")]
    Completed,
    /// The vehicle never showed up (set by processes outside this service)
    #[serde(rename = "no-show")]
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no-show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reserved" => Some(Self::Reserved),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "no-show" => Some(Self::NoShow),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Reserved => false,
            Self::Cancelled | Self::Completed | Self::NoShow => true,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A slot reservation for a time window
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
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

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Reserved
    }

    /// Whether this reservation blocks `[start, end]` on its slot.
    ///
    /// Only `reserved` rows block. Bounds are inclusive, so back-to-back
    /// windows that share an endpoint conflict.
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.is_active() && windows_overlap(self.start_time, self.end_time, start, end)
    }
}

/// Overlap test between an existing window `[s, e]` and a requested window
/// `[new_s, new_e]`, all bounds inclusive:
///
/// - the existing start falls inside the requested window, or
/// - the existing end falls inside the requested window, or
/// - the existing window covers the requested one.
pub fn windows_overlap(
    s: DateTime<Utc>,
    e: DateTime<Utc>,
    new_s: DateTime<Utc>,
    new_e: DateTime<Utc>,
) -> bool {
    let start_inside = new_s <= s && s <= new_e;
    let end_inside = new_s <= e && e <= new_e;
    let covers = s <= new_s && e >= new_e;
    start_inside || end_inside || covers
}

/// Input for inserting a reservation; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub slot_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    fn reservation(start: DateTime<Utc>, end: DateTime<Utc>) -> Reservation {
        Reservation {
            id: 1,
            user_id: 1,
            vehicle_id: 1,
            slot_id: 1,
            start_time: start,
            end_time: end,
            status: ReservationStatus::Reserved,
            created_at: at(9, 0),
            updated_at: at(9, 0),
        }
    }

    #[test]
    fn new_start_inside_existing_window() {
        assert!(windows_overlap(at(10, 0), at(11, 0), at(10, 30), at(11, 30)));
    }

    #[test]
    fn new_end_inside_existing_window() {
        assert!(windows_overlap(at(10, 0), at(11, 0), at(9, 30), at(10, 30)));
    }

    #[test]
    fn new_window_contains_existing() {
        assert!(windows_overlap(at(10, 0), at(11, 0), at(9, 0), at(12, 0)));
    }

    #[test]
    fn existing_window_contains_new() {
        assert!(windows_overlap(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn shared_endpoint_counts_as_overlap() {
        assert!(windows_overlap(at(10, 0), at(11, 0), at(11, 0), at(12, 0)));
        assert!(windows_overlap(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        assert!(!windows_overlap(at(10, 0), at(11, 0), at(11, 1), at(12, 0)));
        assert!(!windows_overlap(at(10, 0), at(11, 0), at(8, 0), at(9, 59)));
    }

    #[test]
    fn only_reserved_rows_block() {
        let mut r = reservation(at(10, 0), at(11, 0));
        assert!(r.blocks(at(10, 30), at(10, 45)));

        for status in [
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
            ReservationStatus::NoShow,
        ] {
            r.status = status;
            assert!(!r.blocks(at(10, 30), at(10, 45)));
        }
    }

    #[test]
    fn status_strings_match_persisted_values() {
        for (status, s) in [
            (ReservationStatus::Reserved, "reserved"),
            (ReservationStatus::Cancelled, "cancelled"),
            (ReservationStatus::Completed, "completed"),
            (ReservationStatus::NoShow, "no-show"),
        ] {
            assert_eq!(status.as_str(), s);
            assert_eq!(ReservationStatus::parse(s), Some(status));
        }
        assert_eq!(ReservationStatus::parse("Reserved"), None);
    }

    #[test]
    fn status_serializes_as_lowercase_value() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"no-show\"");
        assert!(!ReservationStatus::Reserved.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
    }
}
