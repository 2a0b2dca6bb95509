//! HTTP mapping for retrieval errors.

use autoradar_core::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper giving retrieval errors an HTTP shape.
///
/// Only launch-level and page-level failures ever reach a handler;
/// per-item extraction anomalies were already degraded to a smaller
/// result set further down.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::LauncherNotFound(_) | Error::BrowserLaunch(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Navigation(_) | Error::ContainerNotFound(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) | Error::Serialization(_) | Error::MigrationFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::error!(error = %self.0, status = %status, "request failed");

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
