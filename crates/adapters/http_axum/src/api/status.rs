//! Status query.

use axum::Json;
use axum::extract::State;

use nightlight_app::ports::{AmbientSensor, LightSwitch};
use nightlight_domain::status::ControllerStatus;

use crate::state::AppState;

/// `GET /api/status`
pub async fn get<W, S>(State(state): State<AppState<W, S>>) -> Json<ControllerStatus>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    Json(state.controller.status())
}
