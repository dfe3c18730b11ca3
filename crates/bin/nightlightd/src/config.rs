//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `nightlight.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use nightlight_adapter_gpio::GpioConfig;
use nightlight_domain::error::ValidationError;
use nightlight_domain::poll_interval::PollInterval;
use nightlight_domain::threshold::DarknessThreshold;
use nightlight_domain::time_window::TimeWindow;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Peripheral selection.
    pub hardware: HardwareConfig,
    /// Initial controller settings.
    pub control: ControlConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which devices to drive.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Try the GPIO relay instead of the virtual switch.
    pub use_gpio: bool,
    /// BCM line wired to the relay.
    pub relay_pin: u32,
    /// Relay board switches on a low input.
    pub relay_active_low: bool,
    /// BCM line wired to the LDR; the time-window sensor is used when unset.
    pub sensor_pin: Option<u32>,
    pub charge_time_limit_ms: u64,
    pub discharge_ms: u64,
}

/// Initial controller settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub darkness_threshold: f64,
    /// Start of the darkness window for the time-window sensor (`HH:MM`).
    pub evening_time: String,
    /// End of the darkness window for the time-window sensor (`HH:MM`).
    pub morning_time: String,
    pub poll_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `nightlight.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// override does not parse, or if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nightlight.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("NIGHTLIGHT_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("NIGHTLIGHT_PORT") {
            self.server.port = parse_override("NIGHTLIGHT_PORT", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_BIND") {
            let Some((host, port)) = val.rsplit_once(':') else {
                return Err(ConfigError::Override {
                    var: "NIGHTLIGHT_BIND",
                    value: val,
                });
            };
            self.server.port = parse_override("NIGHTLIGHT_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = lookup("NIGHTLIGHT_USE_GPIO") {
            self.hardware.use_gpio = parse_flag("NIGHTLIGHT_USE_GPIO", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_RELAY_PIN") {
            self.hardware.relay_pin = parse_override("NIGHTLIGHT_RELAY_PIN", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_RELAY_ACTIVE_LOW") {
            self.hardware.relay_active_low = parse_flag("NIGHTLIGHT_RELAY_ACTIVE_LOW", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_SENSOR_PIN") {
            self.hardware.sensor_pin = if val.trim().is_empty() {
                None
            } else {
                Some(parse_override("NIGHTLIGHT_SENSOR_PIN", &val)?)
            };
        }
        if let Some(val) = lookup("NIGHTLIGHT_DARKNESS_THRESHOLD") {
            self.control.darkness_threshold =
                parse_override("NIGHTLIGHT_DARKNESS_THRESHOLD", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_EVENING_TIME") {
            self.control.evening_time = val;
        }
        if let Some(val) = lookup("NIGHTLIGHT_MORNING_TIME") {
            self.control.morning_time = val;
        }
        if let Some(val) = lookup("NIGHTLIGHT_POLL_INTERVAL_MS") {
            self.control.poll_interval_ms = parse_override("NIGHTLIGHT_POLL_INTERVAL_MS", &val)?;
        }
        if let Some(val) = lookup("NIGHTLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        self.control.darkness_threshold()?;
        self.control.time_window()?;
        self.control.poll_interval()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl HardwareConfig {
    /// Settings handed to the GPIO devices.
    #[must_use]
    pub fn gpio(&self) -> GpioConfig {
        GpioConfig {
            relay_active_low: self.relay_active_low,
            charge_time_limit_ms: self.charge_time_limit_ms,
            discharge_ms: self.discharge_ms,
        }
    }
}

impl ControlConfig {
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdNotANumber`] for a NaN threshold.
    pub fn darkness_threshold(&self) -> Result<DarknessThreshold, ValidationError> {
        DarknessThreshold::new(self.darkness_threshold)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] if either bound is malformed.
    pub fn time_window(&self) -> Result<TimeWindow, ValidationError> {
        TimeWindow::parse(&self.evening_time, &self.morning_time)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPollInterval`] for a zero interval.
    pub fn poll_interval(&self) -> Result<PollInterval, ValidationError> {
        PollInterval::from_millis(self.poll_interval_ms)
    }
}

fn parse_override<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Override {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Override {
            var,
            value: value.to_string(),
        }),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        let gpio = GpioConfig::default();
        Self {
            use_gpio: false,
            relay_pin: 17,
            relay_active_low: gpio.relay_active_low,
            sensor_pin: None,
            charge_time_limit_ms: gpio.charge_time_limit_ms,
            discharge_ms: gpio.discharge_ms,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            darkness_threshold: DarknessThreshold::DEFAULT.value(),
            evening_time: "21:00".to_string(),
            morning_time: "06:00".to_string(),
            poll_interval_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nightlightd=info,nightlight=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// An environment variable held a value of the wrong shape.
    #[error("environment variable {var} has invalid value {value:?}")]
    Override { var: &'static str, value: String },
    /// The server port was zero.
    #[error("invalid configuration: port must be non-zero")]
    ZeroPort,
    /// A control setting violates a domain invariant.
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}
