//! Check-in domain entity and overstay fine rule

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// A physical occupancy of a slot by a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct Checkin {
    pub id: i32,
    pub vehicle_id: i32,
    pub slot_id: i32,
    pub entry_time: DateTime<Utc>,
    /// Set once, at checkout
    pub exit_time: Option<DateTime<Utc>>,
    /// Zero until checkout
    pub over_stay_fine: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checkin {
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewCheckin {
    pub vehicle_id: i32,
    pub slot_id: i32,
    pub entry_time: DateTime<Utc>,
}

/// How overstays are charged at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct FinePolicy {
    /// Stay length that is never fined
    pub free_duration: Duration,
    /// Charged per started hour beyond `free_duration`
    pub rate_per_hour: Decimal,
}

impl FinePolicy {
    pub fn new(free_minutes: i64, rate_per_hour: Decimal) -> Self {
        Self {
            free_duration: Duration::minutes(free_minutes),
            rate_per_hour,
        }
    }

    /// `ceil((exit - entry - free) / 1h) * rate`, or zero when the stay fits
    /// in the free duration.
    pub fn fine_for(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> Decimal {
        let overstay_ms = ((exit - entry) - self.free_duration).num_milliseconds();
        if overstay_ms <= 0 {
            return Decimal::ZERO;
        }
        let started_hours = (overstay_ms + MS_PER_HOUR - 1) / MS_PER_HOUR;
        Decimal::from(started_hours) * self.rate_per_hour
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self::new(60, Decimal::from(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn fine_after(minutes: i64) -> Decimal {
        FinePolicy::default().fine_for(entry(), entry() + Duration::minutes(minutes))
    }

    #[test]
    fn stay_within_allowance_is_free() {
        assert_eq!(fine_after(45), Decimal::ZERO);
        assert_eq!(fine_after(60), Decimal::ZERO);
    }

    #[test]
    fn partial_hour_over_is_charged_as_full_hour() {
        assert_eq!(fine_after(90), Decimal::from(10));
        assert_eq!(fine_after(61), Decimal::from(10));
        assert_eq!(fine_after(120), Decimal::from(10));
    }

    #[test]
    fn every_started_hour_is_charged() {
        assert_eq!(fine_after(121), Decimal::from(20));
        assert_eq!(fine_after(150), Decimal::from(20));
        assert_eq!(fine_after(60 * 5), Decimal::from(40));
    }

    #[test]
    fn one_millisecond_over_counts() {
        let exit = entry() + Duration::hours(1) + Duration::milliseconds(1);
        assert_eq!(FinePolicy::default().fine_for(entry(), exit), Decimal::from(10));
    }

    #[test]
    fn exit_before_entry_is_never_fined() {
        assert_eq!(fine_after(-30), Decimal::ZERO);
    }

    #[test]
    fn custom_policy() {
        let policy = FinePolicy::new(15, Decimal::new(250, 2));
        let fine = policy.fine_for(entry(), entry() + Duration::minutes(80));
        assert_eq!(fine, Decimal::new(500, 2));
    }
}
