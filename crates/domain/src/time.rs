//! Time and time-of-day helpers.

use chrono::{Local, NaiveTime};

use crate::error::ValidationError;

/// Return the current local wall-clock time of day.
#[must_use]
pub fn local_time_of_day() -> NaiveTime {
    Local::now().time()
}

/// Parse a time of day written as `HH:MM` or `HH:MM:SS` (24-hour clock).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeOfDay`] when the input matches
/// neither format.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTimeOfDay {
            value: value.to_string(),
        })
}
