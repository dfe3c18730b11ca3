//! A single GPIO line, as the devices use it.

use crate::error::GpioError;

/// One GPIO line that can be driven as an output or released to an input.
pub trait GpioLine: Send {
    /// BCM number of the line, for logs and errors.
    fn pin(&self) -> u32;

    /// Switch to output and drive `high` or low. The level is latched before
    /// the mode changes, so the line never glitches to the other level.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] if the backend cannot drive the line.
    fn drive(&mut self, high: bool) -> Result<(), GpioError>;

    /// Switch to a high-impedance input.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] if the backend cannot reconfigure the line.
    fn release(&mut self) -> Result<(), GpioError>;

    /// Sample the line level.
    ///
    /// # Errors
    ///
    /// Returns a [`GpioError`] if the backend cannot sample the line.
    fn is_high(&self) -> Result<bool, GpioError>;
}

#[cfg(target_os = "linux")]
mod system {
    use rppal::gpio::{Gpio, IoPin, Level, Mode};

    use super::GpioLine;
    use crate::error::GpioError;

    /// A Raspberry Pi GPIO line, reached through `rppal`.
    pub struct SystemLine {
        pin: u32,
        io: IoPin,
    }

    impl SystemLine {
        /// Acquire BCM line `pin` as an input.
        ///
        /// # Errors
        ///
        /// Returns [`GpioError::InvalidPin`] for numbers past `u8`, and
        /// [`GpioError::Acquire`] when the host is not a Raspberry Pi or the
        /// line is missing or already in use.
        pub fn open(pin: u32) -> Result<Self, GpioError> {
            let bcm = u8::try_from(pin).map_err(|_| GpioError::InvalidPin { pin })?;
            let gpio = Gpio::new().map_err(|source| GpioError::Acquire { pin, source })?;
            let io = gpio
                .get(bcm)
                .map_err(|source| GpioError::Acquire { pin, source })?
                .into_io(Mode::Input);
            Ok(Self { pin, io })
        }
    }

    impl std::fmt::Debug for SystemLine {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SystemLine")
                .field("pin", &self.pin)
                .field("mode", &self.io.mode())
                .finish()
        }
    }

    impl GpioLine for SystemLine {
        fn pin(&self) -> u32 {
            self.pin
        }

        fn drive(&mut self, high: bool) -> Result<(), GpioError> {
            self.io.write(if high { Level::High } else { Level::Low });
            if self.io.mode() != Mode::Output {
                self.io.set_mode(Mode::Output);
            }
            Ok(())
        }

        fn release(&mut self) -> Result<(), GpioError> {
            self.io.set_mode(Mode::Input);
            Ok(())
        }

        fn is_high(&self) -> Result<bool, GpioError> {
            Ok(self.io.is_high())
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod system {
    use super::GpioLine;
    use crate::error::GpioError;

    /// Placeholder on hosts without GPIO; it can never be constructed.
    #[derive(Debug)]
    pub enum SystemLine {}

    impl SystemLine {
        /// # Errors
        ///
        /// Always returns [`GpioError::Unsupported`].
        pub fn open(_pin: u32) -> Result<Self, GpioError> {
            Err(GpioError::Unsupported)
        }
    }

    impl GpioLine for SystemLine {
        fn pin(&self) -> u32 {
            match *self {}
        }

        fn drive(&mut self, _high: bool) -> Result<(), GpioError> {
            match *self {}
        }

        fn release(&mut self) -> Result<(), GpioError> {
            match *self {}
        }

        fn is_high(&self) -> Result<bool, GpioError> {
            match *self {}
        }
    }
}

pub use system::SystemLine;


#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn should_reject_pin_numbers_past_u8() {
        assert!(matches!(
            SystemLine::open(300),
            Err(GpioError::InvalidPin { pin: 300 })
        ));
    }
}
