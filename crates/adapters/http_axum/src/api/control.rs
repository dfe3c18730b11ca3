//! Control commands: auto mode, manual override and threshold.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use nightlight_app::ports::{AmbientSensor, LightSwitch};
use nightlight_domain::error::ValidationError;
use nightlight_domain::threshold::DarknessThreshold;

use crate::error::ApiError;
use crate::state::AppState;

use super::json_or_default;

fn enabled() -> bool {
    true
}

/// Read a command flag by JSON truthiness: `null`, `false`, zero and empty
/// strings, arrays or objects are false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

/// Request body for `POST /api/auto`.
#[derive(Debug, Deserialize)]
pub struct AutoRequest {
    #[serde(default = "enabled", deserialize_with = "truthy")]
    pub enabled: bool,
}

impl Default for AutoRequest {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Serialize)]
pub struct AutoResponse {
    pub auto: bool,
}

/// Request body for `POST /api/manual`.
#[derive(Debug, Deserialize)]
pub struct ManualRequest {
    #[serde(default = "enabled", deserialize_with = "truthy")]
    pub turn_on: bool,
}

impl Default for ManualRequest {
    fn default() -> Self {
        Self { turn_on: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ManualResponse {
    pub is_on: bool,
    pub auto: bool,
}

/// Request body for `POST /api/threshold`. The value may be a JSON number, a
/// string holding one, or a boolean standing for 1.0 or 0.0.
#[derive(Debug, Default, Deserialize)]
pub struct ThresholdRequest {
    #[serde(default)]
    pub value: Value,
}

impl ThresholdRequest {
    fn threshold(&self) -> Result<f64, ValidationError> {
        match &self.value {
            Value::Number(number) => number.as_f64().ok_or(ValidationError::ThresholdNotANumber),
            Value::String(raw) => raw.parse::<DarknessThreshold>().map(DarknessThreshold::value),
            Value::Bool(flag) => Ok(f64::from(*flag)),
            _ => Err(ValidationError::ThresholdNotANumber),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThresholdResponse {
    pub darkness_threshold: f64,
}

/// `POST /api/auto`
pub async fn set_auto<W, S>(
    State(state): State<AppState<W, S>>,
    body: Bytes,
) -> Result<Json<AutoResponse>, ApiError>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    let req: AutoRequest = json_or_default(&body)?;
    state.controller.set_auto_mode(req.enabled);
    Ok(Json(AutoResponse {
        auto: state.controller.mode().is_auto(),
    }))
}

/// `POST /api/manual`
pub async fn set_manual<W, S>(
    State(state): State<AppState<W, S>>,
    body: Bytes,
) -> Result<Json<ManualResponse>, ApiError>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    let req: ManualRequest = json_or_default(&body)?;
    state.controller.set_manual(req.turn_on);
    Ok(Json(ManualResponse {
        is_on: state.controller.is_on(),
        auto: state.controller.mode().is_auto(),
    }))
}

/// `POST /api/threshold`
///
/// Any body that does not carry a numeric value is answered with
/// `400 {"error": "Invalid threshold"}` and leaves the threshold untouched.
pub async fn set_threshold<W, S>(
    State(state): State<AppState<W, S>>,
    body: Bytes,
) -> Result<Json<ThresholdResponse>, ApiError>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    let req: ThresholdRequest =
        serde_json::from_slice(&body).map_err(|_| ValidationError::ThresholdNotANumber)?;
    let threshold = state.controller.set_darkness_threshold(req.threshold()?)?;
    Ok(Json(ThresholdResponse {
        darkness_threshold: threshold.value(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(body: &str) -> Result<f64, ValidationError> {
        serde_json::from_str::<ThresholdRequest>(body)
            .unwrap()
            .threshold()
    }

    #[test]
    fn should_accept_numeric_threshold() {
        assert_eq!(threshold(r#"{"value": 0.4}"#), Ok(0.4));
    }

    #[test]
    fn should_accept_numeric_string_threshold() {
        assert_eq!(threshold(r#"{"value": " 0.25 "}"#), Ok(0.25));
    }

    #[test]
    fn should_clamp_string_threshold() {
        assert_eq!(threshold(r#"{"value": "7"}"#), Ok(1.0));
    }

    #[test]
    fn should_reject_non_numeric_threshold() {
        assert_eq!(
            threshold(r#"{"value": "abc"}"#),
            Err(ValidationError::ThresholdNotANumber)
        );
        assert_eq!(
            threshold(r#"{"value": null}"#),
            Err(ValidationError::ThresholdNotANumber)
        );
        assert_eq!(
            threshold(r#"{"value": [0.5]}"#),
            Err(ValidationError::ThresholdNotANumber)
        );
        assert_eq!(threshold("{}"), Err(ValidationError::ThresholdNotANumber));
    }

    #[test]
    fn should_read_boolean_threshold_as_one_or_zero() {
        assert_eq!(threshold(r#"{"value": true}"#), Ok(1.0));
        assert_eq!(threshold(r#"{"value": false}"#), Ok(0.0));
    }

    #[test]
    fn should_read_command_flags_by_truthiness() {
        let enabled = |body: &str| serde_json::from_str::<AutoRequest>(body).unwrap().enabled;
        assert!(!enabled(r#"{"enabled": 0}"#));
        assert!(!enabled(r#"{"enabled": 0.0}"#));
        assert!(!enabled(r#"{"enabled": null}"#));
        assert!(!enabled(r#"{"enabled": ""}"#));
        assert!(!enabled(r#"{"enabled": []}"#));
        assert!(!enabled(r#"{"enabled": {}}"#));
        assert!(enabled(r#"{"enabled": 1}"#));
        assert!(enabled(r#"{"enabled": -2.5}"#));
        assert!(enabled(r#"{"enabled": "no"}"#));
        assert!(enabled(r#"{"enabled": [0]}"#));

        let turn_on = |body: &str| serde_json::from_str::<ManualRequest>(body).unwrap().turn_on;
        assert!(turn_on(r#"{"turn_on": 1}"#));
        assert!(!turn_on(r#"{"turn_on": 0}"#));
        assert!(!turn_on(r#"{"turn_on": null}"#));
    }

    #[test]
    fn should_default_auto_request_to_enabled() {
        let req: AutoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.enabled);
        assert!(AutoRequest::default().enabled);
    }

    #[test]
    fn should_default_manual_request_to_on() {
        let req: ManualRequest = serde_json::from_str("{}").unwrap();
        assert!(req.turn_on);
        assert!(ManualRequest::default().turn_on);
    }
}
