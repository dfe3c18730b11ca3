//! Relay-driven light switch.

use std::sync::{Mutex, PoisonError};

use nightlight_app::ports::LightSwitch;

use crate::config::GpioConfig;
use crate::error::GpioError;
use crate::line::{GpioLine, SystemLine};

#[derive(Debug)]
struct Relay<L> {
    line: L,
    on: bool,
}

/// A light behind a relay wired to one GPIO output line.
#[derive(Debug)]
pub struct GpioSwitch<L = SystemLine> {
    pin: u32,
    active_low: bool,
    relay: Mutex<Relay<L>>,
}

impl GpioSwitch {
    /// Acquire BCM line `pin` as an output with the light off.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] when the line cannot be acquired or driven.
    pub fn acquire(config: &GpioConfig, pin: u32) -> Result<Self, GpioError> {
        Self::with_line(SystemLine::open(pin)?, config.relay_active_low)
    }
}

impl<L: GpioLine> GpioSwitch<L> {
    /// Take over `line` and drive it to the off level.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] when the line cannot be driven.
    pub fn with_line(mut line: L, active_low: bool) -> Result<Self, GpioError> {
        line.drive(active_low)?;
        let pin = line.pin();
        tracing::info!(pin, active_low, "GPIO relay acquired");
        Ok(Self {
            pin,
            active_low,
            relay: Mutex::new(Relay { line, on: false }),
        })
    }

    fn apply(&self, on: bool) {
        let mut relay = self.relay.lock().unwrap_or_else(PoisonError::into_inner);
        match relay.line.drive(on != self.active_low) {
            Ok(()) => {
                if relay.on != on {
                    tracing::info!(pin = self.pin, on, "relay switched");
                }
                relay.on = on;
            }
            Err(err) => {
                tracing::error!(pin = self.pin, on, error = %err, "failed to drive relay");
            }
        }
    }
}

impl<L: GpioLine> LightSwitch for GpioSwitch<L> {
    fn name(&self) -> &'static str {
        "gpio"
    }

    fn turn_on(&self) {
        self.apply(true);
    }

    fn turn_off(&self) {
        self.apply(false);
    }

    fn is_on(&self) -> bool {
        self.relay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::fake;

    #[test]
    fn should_start_off_with_line_low() {
        let (line, bench) = fake::line(17);
        let switch = GpioSwitch::with_line(line, false).unwrap();
        assert!(!switch.is_on());
        assert_eq!(bench.output(), Some(false));
    }

    #[test]
    fn should_drive_line_high_when_on() {
        let (line, bench) = fake::line(17);
        let switch = GpioSwitch::with_line(line, false).unwrap();
        switch.turn_on();
        assert!(switch.is_on());
        assert_eq!(bench.output(), Some(true));
        switch.turn_off();
        assert!(!switch.is_on());
        assert_eq!(bench.writes(), vec![false, true, false]);
    }

    #[test]
    fn should_invert_line_when_active_low() {
        let (line, bench) = fake::line(17);
        let switch = GpioSwitch::with_line(line, true).unwrap();
        assert_eq!(bench.output(), Some(true));
        switch.turn_on();
        assert_eq!(bench.output(), Some(false));
        assert!(switch.is_on());
        switch.set(false);
        assert_eq!(bench.output(), Some(true));
    }

    #[test]
    fn should_keep_state_when_drive_fails() {
        let (line, bench) = fake::line(17);
        let switch = GpioSwitch::with_line(line, false).unwrap();
        bench.fail(true);
        switch.turn_on();
        assert!(!switch.is_on());
        assert_eq!(bench.output(), Some(false));
    }

    #[test]
    fn should_fail_to_take_over_a_faulty_line() {
        let (line, bench) = fake::line(17);
        bench.fail(true);
        assert!(matches!(
            GpioSwitch::with_line(line, false),
            Err(GpioError::Io { pin: 17, .. })
        ));
    }

    #[test]
    fn should_refuse_out_of_range_pin() {
        assert!(GpioSwitch::acquire(&GpioConfig::default(), 300).is_err());
    }
}
