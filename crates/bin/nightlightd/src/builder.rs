//! Device selection and controller construction.
//!
//! Hardware that cannot be acquired is replaced by its virtual counterpart
//! with a warning; a missing relay or sensor never stops the daemon.

use nightlight_adapter_gpio::{GpioConfig, GpioLightSensor, GpioSwitch};
use nightlight_adapter_virtual::{TimeWindowSensor, VirtualSwitch};
use nightlight_app::controller::{ControllerSettings, LightController};
use nightlight_app::ports::{AmbientSensor, LightSwitch};
use nightlight_domain::error::SensorReadError;
use nightlight_domain::light_level::LightLevel;
use nightlight_domain::mode::Mode;
use nightlight_domain::time_window::TimeWindow;

use crate::config::{Config, ConfigError, HardwareConfig};

/// The switch the daemon ended up with.
#[derive(Debug)]
pub enum Switch {
    Gpio(GpioSwitch),
    Virtual(VirtualSwitch),
}

impl LightSwitch for Switch {
    fn name(&self) -> &'static str {
        match self {
            Self::Gpio(switch) => switch.name(),
            Self::Virtual(switch) => switch.name(),
        }
    }

    fn turn_on(&self) {
        match self {
            Self::Gpio(switch) => switch.turn_on(),
            Self::Virtual(switch) => switch.turn_on(),
        }
    }

    fn turn_off(&self) {
        match self {
            Self::Gpio(switch) => switch.turn_off(),
            Self::Virtual(switch) => switch.turn_off(),
        }
    }

    fn is_on(&self) -> bool {
        match self {
            Self::Gpio(switch) => switch.is_on(),
            Self::Virtual(switch) => switch.is_on(),
        }
    }
}

/// The ambient sensor the daemon ended up with.
#[derive(Debug)]
pub enum Sensor {
    Gpio(GpioLightSensor),
    TimeWindow(TimeWindowSensor),
}

impl AmbientSensor for Sensor {
    fn name(&self) -> &'static str {
        match self {
            Self::Gpio(sensor) => sensor.name(),
            Self::TimeWindow(sensor) => sensor.name(),
        }
    }

    fn read(&self) -> Result<LightLevel, SensorReadError> {
        match self {
            Self::Gpio(sensor) => sensor.read(),
            Self::TimeWindow(sensor) => sensor.read(),
        }
    }
}

/// Use the GPIO relay when asked to and it can be acquired, the virtual
/// switch otherwise.
#[must_use]
pub fn select_switch(hardware: &HardwareConfig, gpio: &GpioConfig) -> Switch {
    if !hardware.use_gpio {
        return Switch::Virtual(VirtualSwitch::default());
    }
    match GpioSwitch::acquire(gpio, hardware.relay_pin) {
        Ok(switch) => Switch::Gpio(switch),
        Err(err) => {
            tracing::warn!(
                pin = hardware.relay_pin,
                error = %err,
                "GPIO relay unavailable, falling back to virtual switch"
            );
            Switch::Virtual(VirtualSwitch::default())
        }
    }
}

/// Use the GPIO light sensor when a sensor pin is configured and it can be
/// acquired, the time-window sensor otherwise.
#[must_use]
pub fn select_sensor(hardware: &HardwareConfig, gpio: &GpioConfig, window: TimeWindow) -> Sensor {
    let Some(pin) = hardware.sensor_pin else {
        return Sensor::TimeWindow(TimeWindowSensor::new(window));
    };
    match GpioLightSensor::acquire(gpio, pin) {
        Ok(sensor) => Sensor::Gpio(sensor),
        Err(err) => {
            tracing::warn!(
                pin,
                error = %err,
                %window,
                "GPIO light sensor unavailable, falling back to time-window sensor"
            );
            Sensor::TimeWindow(TimeWindowSensor::new(window))
        }
    }
}

/// Select devices from `config` and start the controller in auto mode.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if a control setting is invalid.
/// Device acquisition failures are never returned.
pub fn build(config: &Config) -> Result<LightController<Switch, Sensor>, ConfigError> {
    let settings = ControllerSettings {
        poll_interval: config.control.poll_interval()?,
        read_timeout: None,
        mode: Mode::Auto,
        darkness_threshold: config.control.darkness_threshold()?,
    };
    let window = config.control.time_window()?;
    let gpio = config.hardware.gpio();

    let switch = select_switch(&config.hardware, &gpio);
    let sensor = select_sensor(&config.hardware, &gpio, window);

    Ok(LightController::start(switch, Some(sensor), settings))
}
