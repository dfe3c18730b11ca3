//! GPIO adapter configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration shared by the GPIO devices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    /// Drive the relay line low to turn the light on.
    pub relay_active_low: bool,
    /// Longest RC charge time, in milliseconds, before a reading counts as
    /// fully dark.
    pub charge_time_limit_ms: u64,
    /// How long the capacitor is drained before each measurement, in
    /// milliseconds.
    pub discharge_ms: u64,
}

impl GpioConfig {
    #[must_use]
    pub fn charge_time_limit(&self) -> Duration {
        Duration::from_millis(self.charge_time_limit_ms.max(1))
    }

    #[must_use]
    pub fn discharge(&self) -> Duration {
        Duration::from_millis(self.discharge_ms)
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            relay_active_low: false,
            charge_time_limit_ms: 10,
            discharge_ms: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_active_high_relay() {
        let config = GpioConfig::default();
        assert!(!config.relay_active_low);
        assert_eq!(config.charge_time_limit(), Duration::from_millis(10));
        assert_eq!(config.discharge(), Duration::from_millis(5));
    }

    #[test]
    fn should_never_use_a_zero_charge_limit() {
        let config = GpioConfig {
            charge_time_limit_ms: 0,
            ..GpioConfig::default()
        };
        assert_eq!(config.charge_time_limit(), Duration::from_millis(1));
    }
}
