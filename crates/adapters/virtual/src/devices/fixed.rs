//! Fixed-value sensor: deterministic readings for tests and demos.

use nightlight_app::ports::AmbientSensor;
use nightlight_domain::error::SensorReadError;
use nightlight_domain::light_level::LightLevel;

/// A sensor that always reads the same level.
#[derive(Debug, Clone, Copy)]
pub struct FixedLightSensor {
    level: LightLevel,
}

impl FixedLightSensor {
    #[must_use]
    pub fn new(level: LightLevel) -> Self {
        Self { level }
    }
}

impl AmbientSensor for FixedLightSensor {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn read(&self) -> Result<LightLevel, SensorReadError> {
        Ok(self.level)
    }
}
