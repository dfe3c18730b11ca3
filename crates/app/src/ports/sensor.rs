//! Ambient sensor port: the input side of the controller.

use nightlight_domain::error::SensorReadError;
use nightlight_domain::light_level::LightLevel;

/// A source of ambient brightness readings.
///
/// `read` may block (e.g. while timing a GPIO line), so the controller always
/// calls it from the blocking thread pool under a timeout.
pub trait AmbientSensor: Send + Sync {
    /// Short name used in logs (e.g. `"gpio"`, `"time_window"`).
    fn name(&self) -> &'static str;

    /// Read the current light level.
    ///
    /// # Errors
    ///
    /// Returns a [`SensorReadError`] when the device produced no usable value.
    fn read(&self) -> Result<LightLevel, SensorReadError>;
}

impl<T: AmbientSensor + ?Sized> AmbientSensor for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read(&self) -> Result<LightLevel, SensorReadError> {
        (**self).read()
    }
}
