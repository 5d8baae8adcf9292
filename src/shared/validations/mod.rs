use chrono::{DateTime, Utc};

use crate::shared::DomainError;

/// Ids coming from paths and bodies must be positive integers.
pub fn validate_id(field: &'static str, id: i32) -> Result<(), DomainError> {
    if id < 1 {
        return Err(DomainError::validation(field, "must be a positive integer"));
    }
    Ok(())
}

pub fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), DomainError> {
    if start >= end {
        return Err(DomainError::validation(
            "endTime",
            "End time must be after start time",
        ));
    }
    Ok(())
}
