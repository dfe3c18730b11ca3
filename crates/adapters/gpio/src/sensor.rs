//! RC-timing light sensor.
//!
//! An LDR in series with a capacitor shares one GPIO line. Each reading
//! drains the capacitor by driving the line low, then releases it to input
//! and times how long the capacitor takes to charge past the logic-high
//! threshold. Bright light means low resistance and a fast charge.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use nightlight_app::ports::AmbientSensor;
use nightlight_domain::error::SensorReadError;
use nightlight_domain::light_level::LightLevel;

use crate::config::GpioConfig;
use crate::error::GpioError;
use crate::line::{GpioLine, SystemLine};

const POLL_STEP: Duration = Duration::from_micros(50);

/// Light-dependent resistor + capacitor on one GPIO line.
#[derive(Debug)]
pub struct GpioLightSensor<L = SystemLine> {
    pin: u32,
    charge_limit: Duration,
    discharge: Duration,
    line: Mutex<L>,
}

impl GpioLightSensor {
    /// Acquire BCM line `pin` for RC timing.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] when the line cannot be acquired or driven.
    pub fn acquire(config: &GpioConfig, pin: u32) -> Result<Self, GpioError> {
        Self::with_line(SystemLine::open(pin)?, config)
    }
}

impl<L: GpioLine> GpioLightSensor<L> {
    /// Take over `line`, leaving the capacitor drained.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] when the line cannot be driven.
    pub fn with_line(mut line: L, config: &GpioConfig) -> Result<Self, GpioError> {
        line.drive(false)?;
        let pin = line.pin();
        tracing::info!(pin, "GPIO light sensor acquired");
        Ok(Self {
            pin,
            charge_limit: config.charge_time_limit(),
            discharge: config.discharge(),
            line: Mutex::new(line),
        })
    }

    fn charge_time(&self) -> Result<Option<Duration>, GpioError> {
        let mut line = self.line.lock().unwrap_or_else(PoisonError::into_inner);

        line.drive(false)?;
        std::thread::sleep(self.discharge);
        line.release()?;

        let started = Instant::now();
        loop {
            if line.is_high()? {
                return Ok(Some(started.elapsed()));
            }
            if started.elapsed() >= self.charge_limit {
                return Ok(None);
            }
            std::thread::sleep(POLL_STEP);
        }
    }
}

/// Map a charge time onto the light scale. A line that never went high is dark.
pub(crate) fn charge_level(charge_time: Option<Duration>, limit: Duration) -> LightLevel {
    match charge_time {
        Some(elapsed) if !limit.is_zero() => {
            LightLevel::saturating(1.0 - elapsed.as_secs_f64() / limit.as_secs_f64())
        }
        _ => LightLevel::DARK,
    }
}

impl<L: GpioLine> AmbientSensor for GpioLightSensor<L> {
    fn name(&self) -> &'static str {
        "gpio"
    }

    fn read(&self) -> Result<LightLevel, SensorReadError> {
        let charge_time = self.charge_time()?;
        let level = charge_level(charge_time, self.charge_limit);
        tracing::debug!(
            pin = self.pin,
            charge_time = ?charge_time,
            level = level.value(),
            "light sensor read"
        );
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::fake;

    fn sensor(limit_ms: u64) -> (GpioLightSensor<fake::FakeLine>, fake::Bench) {
        let (line, bench) = fake::line(4);
        let config = GpioConfig {
            charge_time_limit_ms: limit_ms,
            discharge_ms: 0,
            ..GpioConfig::default()
        };
        (GpioLightSensor::with_line(line, &config).unwrap(), bench)
    }

    #[test]
    fn should_read_dark_when_line_never_charges() {
        assert_eq!(
            charge_level(None, Duration::from_millis(10)),
            LightLevel::DARK
        );
    }

    #[test]
    fn should_read_bright_for_instant_charge() {
        assert_eq!(
            charge_level(Some(Duration::ZERO), Duration::from_millis(10)),
            LightLevel::BRIGHT
        );
    }

    #[test]
    fn should_scale_linearly_with_charge_time() {
        let level = charge_level(Some(Duration::from_millis(7)), Duration::from_millis(10));
        assert!((level.value() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn should_saturate_when_charge_exceeds_limit() {
        assert_eq!(
            charge_level(Some(Duration::from_millis(12)), Duration::from_millis(10)),
            LightLevel::DARK
        );
    }

    #[test]
    fn should_start_with_capacitor_drained() {
        let (_sensor, bench) = sensor(20);
        assert_eq!(bench.output(), Some(false));
    }

    #[test]
    fn should_read_dark_when_line_stays_low() {
        let (sensor, bench) = sensor(20);
        bench.charge_after(None);
        assert_eq!(sensor.read().unwrap(), LightLevel::DARK);
        assert_eq!(bench.output(), None);
    }

    #[test]
    fn should_read_bright_when_line_charges_immediately() {
        let (sensor, bench) = sensor(50);
        bench.charge_after(Some(Duration::ZERO));
        assert!(sensor.read().unwrap().value() > 0.5);
    }

    #[test]
    fn should_read_darker_for_slower_charge() {
        let (sensor, bench) = sensor(200);
        bench.charge_after(Some(Duration::from_millis(150)));
        let level = sensor.read().unwrap().value();
        assert!(level < 0.3, "level {level}");
    }

    #[test]
    fn should_discharge_before_every_reading() {
        let (sensor, bench) = sensor(20);
        bench.charge_after(Some(Duration::ZERO));
        sensor.read().unwrap();
        sensor.read().unwrap();
        assert_eq!(bench.writes(), vec![false, false, false]);
    }

    #[test]
    fn should_surface_line_fault_as_device_error() {
        let (sensor, bench) = sensor(20);
        bench.fail(true);
        assert!(matches!(sensor.read(), Err(SensorReadError::Device(_))));
    }

    #[test]
    fn should_refuse_out_of_range_pin() {
        assert!(GpioLightSensor::acquire(&GpioConfig::default(), 300).is_err());
    }
}
