//! # nightlight-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small JSON API (`/api/status`, `/api/auto`, `/api/manual`,
//!   `/api/threshold`) over a running [`LightController`](nightlight_app::controller::LightController)
//! - Map request bodies into controller commands and controller state into
//!   JSON responses
//!
//! ## Dependency rule
//! Depends on `nightlight-app` (for the controller and port traits) and
//! `nightlight-domain` (for the types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
