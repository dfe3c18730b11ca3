//! GPIO adapter error types.

use nightlight_domain::error::SensorReadError;

/// Errors raised while acquiring or driving a GPIO line.
#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    /// The host is not running Linux.
    #[error("GPIO is only available on Linux")]
    Unsupported,

    /// The pin number cannot name a BCM GPIO line.
    #[error("GPIO pin {pin} is out of range")]
    InvalidPin { pin: u32 },

    /// The GPIO peripheral or the line could not be acquired.
    #[cfg(target_os = "linux")]
    #[error("failed to acquire GPIO pin {pin}")]
    Acquire {
        pin: u32,
        #[source]
        source: rppal::gpio::Error,
    },

    /// Driving or sampling an acquired line failed.
    #[error("GPIO pin {pin} I/O failed")]
    Io {
        pin: u32,
        #[source]
        source: std::io::Error,
    },
}

impl From<GpioError> for SensorReadError {
    fn from(err: GpioError) -> Self {
        Self::Device(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unsupported_error() {
        assert_eq!(
            GpioError::Unsupported.to_string(),
            "GPIO is only available on Linux"
        );
    }

    #[test]
    fn should_display_invalid_pin() {
        assert_eq!(
            GpioError::InvalidPin { pin: 300 }.to_string(),
            "GPIO pin 300 is out of range"
        );
    }

    #[test]
    fn should_display_pin_for_io_error() {
        let err = GpioError::Io {
            pin: 17,
            source: std::io::Error::other("busy"),
        };
        assert_eq!(err.to_string(), "GPIO pin 17 I/O failed");
    }

    #[test]
    fn should_convert_into_sensor_device_error() {
        let err: SensorReadError = GpioError::InvalidPin { pin: 99 }.into();
        assert!(matches!(err, SensorReadError::Device(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn should_keep_rppal_error_as_source() {
        use std::error::Error as _;

        let err = GpioError::Acquire {
            pin: 60,
            source: rppal::gpio::Error::PinNotAvailable(60),
        };
        assert_eq!(err.to_string(), "failed to acquire GPIO pin 60");
        assert!(err.source().is_some());
    }
}
