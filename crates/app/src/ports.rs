//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the controller and the hardware it
//! supervises. They are defined here (in `app`) so that both the controller
//! and the adapter crates can depend on them without circular dependencies.

pub mod sensor;
pub mod switch;

pub use sensor::AmbientSensor;
pub use switch::LightSwitch;
