//! # nightlight-domain
//!
//! Pure domain model for the nightlight controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, time-of-day helpers
//! - Define the **control mode** (auto / manual) state machine values
//! - Define the **darkness threshold** and **light level** scales, both
//!   normalised to `[0, 1]` where `0` is fully dark
//! - Define the **darkness window** used by clock-based sensing
//! - Define the **status snapshot** exposed to callers
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod light_level;
pub mod mode;
pub mod poll_interval;
pub mod status;
pub mod threshold;
pub mod time_window;
