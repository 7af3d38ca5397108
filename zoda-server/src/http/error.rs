// ========================================================
// File: zoda-server/src/http/error.rs
// ========================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;
use zoda_common::Error;

/// Adapter that turns the shared error enum into the API's JSON envelope:
/// every failure body is `{"error": "<message>"}`.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Upstream(_) | Error::Http(_) | Error::InvalidUri(_) => StatusCode::BAD_GATEWAY,
            Error::Chain(_) | Error::NetworkMismatch { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();
        warn!(status = %status, "request failed: {}", message);
        (status, Json(json!({ "error": message }))).into_response()
    }
}
