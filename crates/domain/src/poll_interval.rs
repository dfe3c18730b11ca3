//! Poll interval: the cadence of the evaluation loop.

use std::time::Duration;

use crate::error::ValidationError;

/// A strictly positive duration between two evaluation ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollInterval(Duration);

impl PollInterval {
    pub const DEFAULT: Self = Self(Duration::from_secs(5));

    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPollInterval`] for a zero duration.
    pub fn new(duration: Duration) -> Result<Self, ValidationError> {
        if duration.is_zero() {
            return Err(ValidationError::ZeroPollInterval);
        }
        Ok(Self(duration))
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPollInterval`] when `millis` is zero.
    pub fn from_millis(millis: u64) -> Result<Self, ValidationError> {
        Self::new(Duration::from_millis(millis))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// How long a caller waits for the loop to stop: two full intervals.
    #[must_use]
    pub fn shutdown_bound(self) -> Duration {
        self.0.saturating_mul(2)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}
