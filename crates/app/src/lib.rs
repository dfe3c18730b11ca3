//! # nightlight-app
//!
//! Application layer: the light controller and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LightSwitch`: turn the fixture on/off and report its state
//!   - `AmbientSensor`: read a normalised light level
//! - Provide the **driving/inbound** use-case struct:
//!   - `LightController`: auto/manual state machine, threshold, status,
//!     and the background evaluation loop
//! - Orchestrate domain objects without knowing *how* hardware is reached
//!
//! ## Dependency rule
//! Depends on `nightlight-domain` only (plus `tokio` for the loop task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod controller;
pub mod ports;
