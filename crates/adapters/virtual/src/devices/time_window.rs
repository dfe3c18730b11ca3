//! Clock-based sensor: infers darkness from the time of day.

use chrono::NaiveTime;

use nightlight_app::ports::AmbientSensor;
use nightlight_domain::error::SensorReadError;
use nightlight_domain::light_level::LightLevel;
use nightlight_domain::time::local_time_of_day;
use nightlight_domain::time_window::TimeWindow;

/// A virtual sensor that reports [`LightLevel::DARK`] inside the configured
/// [`TimeWindow`] and [`LightLevel::BRIGHT`] outside it.
///
/// The signal is two-level: there is no twilight ramp.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindowSensor {
    window: TimeWindow,
    clock: fn() -> NaiveTime,
}

impl TimeWindowSensor {
    /// Create a sensor that follows the local wall clock.
    #[must_use]
    pub fn new(window: TimeWindow) -> Self {
        Self::with_clock(window, local_time_of_day)
    }

    /// Create a sensor driven by a custom clock.
    #[must_use]
    pub fn with_clock(window: TimeWindow, clock: fn() -> NaiveTime) -> Self {
        Self { window, clock }
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

impl AmbientSensor for TimeWindowSensor {
    fn name(&self) -> &'static str {
        "time_window"
    }

    fn read(&self) -> Result<LightLevel, SensorReadError> {
        let now = (self.clock)();
        let dark = self.window.is_dark(now);
        tracing::debug!(%now, window = %self.window, dark, "time window sensor");
        Ok(if dark {
            LightLevel::DARK
        } else {
            LightLevel::BRIGHT
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn daytime_window() -> TimeWindow {
        TimeWindow::new(at(8, 0), at(18, 0))
    }

    fn read_at(window: TimeWindow, clock: fn() -> NaiveTime) -> f64 {
        TimeWindowSensor::with_clock(window, clock)
            .read()
            .unwrap()
            .value()
    }

    #[test]
    fn should_read_dark_inside_non_wrapping_window() {
        assert_eq!(read_at(daytime_window(), || at(8, 0)), 0.0);
        assert_eq!(read_at(daytime_window(), || at(13, 15)), 0.0);
        assert_eq!(read_at(daytime_window(), || at(18, 0)), 0.0);
    }

    #[test]
    fn should_read_bright_outside_non_wrapping_window() {
        assert_eq!(read_at(daytime_window(), || at(7, 59)), 1.0);
        assert_eq!(read_at(daytime_window(), || at(18, 1)), 1.0);
        assert_eq!(read_at(daytime_window(), || at(23, 0)), 1.0);
    }

    #[test]
    fn should_read_dark_late_evening_when_wrapping() {
        assert_eq!(read_at(TimeWindow::default(), || at(23, 0)), 0.0);
    }

    #[test]
    fn should_read_dark_early_morning_when_wrapping() {
        assert_eq!(read_at(TimeWindow::default(), || at(2, 0)), 0.0);
    }

    #[test]
    fn should_read_bright_at_noon_when_wrapping() {
        assert_eq!(read_at(TimeWindow::default(), || at(12, 0)), 1.0);
    }

    #[test]
    fn should_follow_local_clock_by_default() {
        let sensor = TimeWindowSensor::new(TimeWindow::default());
        let value = sensor.read().unwrap().value();
        assert!(value == 0.0 || value == 1.0);
    }

    #[test]
    fn should_expose_configured_window() {
        let sensor = TimeWindowSensor::new(daytime_window());
        assert_eq!(sensor.window(), daytime_window());
    }
}
