//! Shared application state for axum handlers.

use std::sync::Arc;

use nightlight_app::controller::LightController;

/// Application state shared across all axum handlers.
///
/// Only a started controller can be wrapped, so handlers never observe a
/// controller that does not exist yet. `Clone` is implemented manually so the
/// switch and sensor types do not need to be `Clone`.
pub struct AppState<W, S> {
    pub controller: Arc<LightController<W, S>>,
}

impl<W, S> Clone for AppState<W, S> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<W, S> AppState<W, S> {
    /// Wrap a controller the caller also keeps a handle on, e.g. to shut it
    /// down once the server stops.
    pub fn new(controller: Arc<LightController<W, S>>) -> Self {
        Self { controller }
    }
}
