//! Virtual device implementations: switch, clock sensor, fixed sensor.

mod fixed;
mod switch;
mod time_window;

pub use fixed::FixedLightSensor;
pub use switch::VirtualSwitch;
pub use time_window::TimeWindowSensor;
