//! Light level: a normalised ambient brightness reading.

use serde::{Deserialize, Serialize};

use crate::error::SensorReadError;

/// Ambient brightness on a `[0, 1]` scale: `0` is fully dark, `1` fully bright.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LightLevel(f64);

impl LightLevel {
    pub const DARK: Self = Self(0.0);
    pub const BRIGHT: Self = Self(1.0);

    /// Wrap a raw sensor value.
    ///
    /// # Errors
    ///
    /// Returns [`SensorReadError::OutOfRange`] for NaN or values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, SensorReadError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SensorReadError::OutOfRange { value })
        }
    }

    /// Wrap a raw value, forcing it onto the scale. NaN maps to dark.
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::DARK
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for LightLevel {
    type Error = SensorReadError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LightLevel> for f64 {
    fn from(level: LightLevel) -> Self {
        level.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_bounds() {
        assert_eq!(LightLevel::new(0.0).unwrap(), LightLevel::DARK);
        assert_eq!(LightLevel::new(1.0).unwrap(), LightLevel::BRIGHT);
    }

    #[test]
    fn should_reject_out_of_range_values() {
        assert!(matches!(
            LightLevel::new(1.5),
            Err(SensorReadError::OutOfRange { .. })
        ));
        assert!(LightLevel::new(-0.1).is_err());
        assert!(LightLevel::new(f64::NAN).is_err());
    }

    #[test]
    fn should_saturate_onto_scale() {
        assert_eq!(LightLevel::saturating(3.0), LightLevel::BRIGHT);
        assert_eq!(LightLevel::saturating(-3.0), LightLevel::DARK);
        assert_eq!(LightLevel::saturating(f64::NAN), LightLevel::DARK);
        assert_eq!(LightLevel::saturating(0.4).value(), 0.4);
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let level = LightLevel::new(0.25).unwrap();
        assert_eq!(serde_json::to_string(&level).unwrap(), "0.25");
    }
}
