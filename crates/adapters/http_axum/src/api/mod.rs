//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
pub mod status;

use axum::Router;
use axum::body::Bytes;
use axum::routing::{get, post};
use serde::de::DeserializeOwned;

use nightlight_app::ports::{AmbientSensor, LightSwitch};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<W, S>() -> Router<AppState<W, S>>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    Router::new()
        .route("/status", get(status::get::<W, S>))
        .route("/auto", post(control::set_auto::<W, S>))
        .route("/manual", post(control::set_manual::<W, S>))
        .route("/threshold", post(control::set_threshold::<W, S>))
}

/// Decode a JSON body, treating an empty body as all defaults.
fn json_or_default<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}
