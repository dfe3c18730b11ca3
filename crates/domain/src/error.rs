//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! The domain owns the two kinds every layer has to talk about: rejected
//! input ([`ValidationError`]) and failed sensor reads ([`SensorReadError`]).

use std::time::Duration;

/// Input that violates a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The darkness threshold was not a number.
    #[error("Invalid threshold")]
    ThresholdNotANumber,

    /// A poll interval of zero would spin the evaluation loop.
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    /// A time of day could not be parsed.
    #[error("invalid time of day {value:?}, expected HH:MM")]
    InvalidTimeOfDay {
        /// The rejected input.
        value: String,
    },
}

/// Why a single ambient sensor read produced no value.
///
/// Read failures are absorbed by the evaluation loop; they never reach
/// callers of the controller's command surface.
#[derive(Debug, thiserror::Error)]
pub enum SensorReadError {
    /// The underlying device reported an error.
    #[error("sensor device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The read did not complete within its time budget.
    #[error("sensor read did not complete within {0:?}")]
    TimedOut(Duration),

    /// The sensor produced a value outside the normalised scale.
    #[error("sensor produced {value}, outside 0.0..=1.0")]
    OutOfRange {
        /// The offending raw value.
        value: f64,
    },

    /// The read was cancelled or crashed before producing a value.
    #[error("sensor read was interrupted")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_threshold_error_as_user_facing_message() {
        assert_eq!(
            ValidationError::ThresholdNotANumber.to_string(),
            "Invalid threshold"
        );
    }

    #[test]
    fn should_display_invalid_time_with_input() {
        let err = ValidationError::InvalidTimeOfDay {
            value: "25:99".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid time of day \"25:99\", expected HH:MM"
        );
    }

    #[test]
    fn should_display_timeout_with_duration() {
        let err = SensorReadError::TimedOut(Duration::from_millis(250));
        assert_eq!(
            err.to_string(),
            "sensor read did not complete within 250ms"
        );
    }

    #[test]
    fn should_keep_device_error_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SensorReadError::Device(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "gone");
    }
}
