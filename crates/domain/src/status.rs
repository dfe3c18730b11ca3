//! Status snapshot: what callers can observe about the controller.

use serde::{Deserialize, Serialize};

use crate::light_level::LightLevel;
use crate::mode::Mode;
use crate::threshold::DarknessThreshold;

/// Point-in-time view of the controller.
///
/// Fields are read one after another, so a snapshot taken while an
/// evaluation tick is running may mix values from before and after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerStatus {
    /// `true` while the evaluation loop drives the switch.
    pub auto: bool,
    pub is_on: bool,
    /// Most recent successful sensor reading, if any.
    pub sensor_value: Option<f64>,
    pub darkness_threshold: f64,
}

impl ControllerStatus {
    #[must_use]
    pub fn new(
        mode: Mode,
        is_on: bool,
        last_reading: Option<LightLevel>,
        threshold: DarknessThreshold,
    ) -> Self {
        Self {
            auto: mode.is_auto(),
            is_on,
            sensor_value: last_reading.map(LightLevel::value),
            darkness_threshold: threshold.value(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::from_auto_enabled(self.auto)
    }
}
