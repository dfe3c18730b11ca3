//! # nightlight-adapter-virtual
//!
//! Virtual integration that stands in for real peripherals.
//!
//! ## Provided devices
//!
//! | Device | Port | Behaviour |
//! |--------|------|-----------|
//! | [`VirtualSwitch`] | `LightSwitch` | Records and logs `turn_on` / `turn_off`, never fails |
//! | [`TimeWindowSensor`] | `AmbientSensor` | Reads `0.0` inside the darkness window, `1.0` outside |
//! | [`FixedLightSensor`] | `AmbientSensor` | Always reads the configured level |
//!
//! ## Dependency rule
//!
//! Depends on `nightlight-app` (port traits) and `nightlight-domain` only.

mod devices;

pub use devices::{FixedLightSensor, TimeWindowSensor, VirtualSwitch};
