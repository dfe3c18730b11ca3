//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use nightlight_domain::error::ValidationError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors a handler can turn into a `400` response.
#[derive(Debug)]
pub enum ApiError {
    /// The command was well-formed but its value was rejected.
    Validation(ValidationError),
    /// The request body was not the JSON the endpoint expects.
    MalformedBody(serde_json::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Validation(err) => err.to_string(),
            Self::MalformedBody(err) => {
                tracing::debug!(error = %err, "rejected malformed request body");
                format!("malformed request body: {err}")
            }
        };

        (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
    }
}
