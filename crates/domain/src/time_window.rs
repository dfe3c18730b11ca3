//! Darkness window: an evening-to-morning span of the day.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::parse_time_of_day;

/// The part of the day considered dark, from `evening_start` to `morning_end`.
///
/// When `evening_start < morning_end` the window lies within a single day and
/// both ends are inclusive. Otherwise the window wraps past midnight: any time
/// at or after `evening_start`, or at or before `morning_end`, is dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub evening_start: NaiveTime,
    pub morning_end: NaiveTime,
}

impl TimeWindow {
    #[must_use]
    pub fn new(evening_start: NaiveTime, morning_end: NaiveTime) -> Self {
        Self {
            evening_start,
            morning_end,
        }
    }

    /// Build a window from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] if either bound is malformed.
    pub fn parse(evening_start: &str, morning_end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            parse_time_of_day(evening_start)?,
            parse_time_of_day(morning_end)?,
        ))
    }

    /// Whether the window spans midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.evening_start >= self.morning_end
    }

    #[must_use]
    pub fn is_dark(&self, now: NaiveTime) -> bool {
        if self.wraps_midnight() {
            now >= self.evening_start || now <= self.morning_end
        } else {
            self.evening_start <= now && now <= self.morning_end
        }
    }
}

impl Default for TimeWindow {
    /// 21:00 to 06:00.
    fn default() -> Self {
        Self::new(
            NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
        )
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            self.evening_start.format("%H:%M"),
            self.morning_end.format("%H:%M")
        )
    }
}
