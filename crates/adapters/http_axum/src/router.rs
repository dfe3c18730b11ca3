//! Axum router assembly.

use axum::Json;
use axum::Router;
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use nightlight_app::ports::{AmbientSensor, LightSwitch};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the control API under `/api` and adds a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level.
pub fn build<W, S>(state: AppState<W, S>) -> Router
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
