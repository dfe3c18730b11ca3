//! Darkness threshold: the light level at or below which the light turns on.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::light_level::LightLevel;

/// A cutoff on the normalised light scale, always within `[0, 1]`.
///
/// Out-of-range numbers are clamped rather than rejected; only input that is
/// not a number at all is refused.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DarknessThreshold(f64);

impl DarknessThreshold {
    pub const DEFAULT: Self = Self(0.3);

    /// Clamp `value` into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdNotANumber`] when `value` is NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() {
            return Err(ValidationError::ThresholdNotANumber);
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether `level` is dark enough to switch the light on.
    #[must_use]
    pub fn is_dark(self, level: LightLevel) -> bool {
        level.value() <= self.0
    }
}

impl Default for DarknessThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for DarknessThreshold {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DarknessThreshold> for f64 {
    fn from(threshold: DarknessThreshold) -> Self {
        threshold.0
    }
}

impl FromStr for DarknessThreshold {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::ThresholdNotANumber)?;
        Self::new(value)
    }
}

impl std::fmt::Display for DarknessThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: f64) -> LightLevel {
        LightLevel::new(value).unwrap()
    }

    #[test]
    fn should_keep_in_range_value() {
        assert_eq!(DarknessThreshold::new(0.42).unwrap().value(), 0.42);
    }

    #[test]
    fn should_clamp_values_above_one() {
        assert_eq!(DarknessThreshold::new(1.7).unwrap().value(), 1.0);
        assert_eq!(DarknessThreshold::new(f64::INFINITY).unwrap().value(), 1.0);
    }

    #[test]
    fn should_clamp_values_below_zero() {
        assert_eq!(DarknessThreshold::new(-0.2).unwrap().value(), 0.0);
        assert_eq!(
            DarknessThreshold::new(f64::NEG_INFINITY).unwrap().value(),
            0.0
        );
    }

    #[test]
    fn should_equal_clamped_input_for_any_number() {
        for t in [-10.0, -0.0001, 0.0, 0.25, 0.5, 0.999, 1.0, 1.0001, 42.0] {
            let stored = DarknessThreshold::new(t).unwrap().value();
            assert_eq!(stored, t.clamp(0.0, 1.0), "input {t}");
        }
    }

    #[test]
    fn should_reject_nan() {
        assert_eq!(
            DarknessThreshold::new(f64::NAN),
            Err(ValidationError::ThresholdNotANumber)
        );
    }

    #[test]
    fn should_default_to_point_three() {
        assert_eq!(DarknessThreshold::default().value(), 0.3);
    }

    #[test]
    fn should_treat_reading_equal_to_threshold_as_dark() {
        let t = DarknessThreshold::new(0.3).unwrap();
        assert!(t.is_dark(level(0.3)));
        assert!(t.is_dark(level(0.0)));
        assert!(!t.is_dark(level(0.31)));
    }

    #[test]
    fn should_parse_numeric_string() {
        let t: DarknessThreshold = " 0.6 ".parse().unwrap();
        assert_eq!(t.value(), 0.6);
    }

    #[test]
    fn should_clamp_parsed_string() {
        let t: DarknessThreshold = "3".parse().unwrap();
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn should_reject_non_numeric_string() {
        let result: Result<DarknessThreshold, _> = "dim".parse();
        assert_eq!(result, Err(ValidationError::ThresholdNotANumber));
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let t = DarknessThreshold::new(0.5).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "0.5");
    }

    #[test]
    fn should_clamp_when_deserializing() {
        let t: DarknessThreshold = serde_json::from_str("2.5").unwrap();
        assert_eq!(t.value(), 1.0);
    }
}
