//! # nightlight-adapter-gpio
//!
//! Peripheral adapter for a Raspberry Pi, built on [`rppal`](https://docs.rs/rppal).
//!
//! ## Provided devices
//!
//! | Device | Port | Wiring |
//! |--------|------|--------|
//! | [`GpioSwitch`] | `LightSwitch` | Output line to a relay (optionally active-low) |
//! | [`GpioLightSensor`] | `AmbientSensor` | LDR in series with a capacitor on one line |
//!
//! Both devices acquire their line in the constructor; a board without the
//! line (or a host that is not a Raspberry Pi) fails there with a
//! [`GpioError`], never later. Pins use BCM numbering.
//!
//! The devices are generic over [`GpioLine`], defaulting to the board's
//! [`SystemLine`], so they can run against other line backends.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `nightlight-app` and `nightlight-domain`.

mod config;
mod error;
mod line;
mod sensor;
mod switch;

pub use config::GpioConfig;
pub use error::GpioError;
pub use line::{GpioLine, SystemLine};
pub use sensor::GpioLightSensor;
pub use switch::GpioSwitch;
