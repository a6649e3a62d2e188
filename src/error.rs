//! Error types for the forecast service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the forecast service.
///
/// Foreground (request-facing) failures are converted into HTTP responses
/// via [`IntoResponse`]. Background refresh failures are logged and never
/// reach a caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Market-data provider responded with a non-success status or was unreachable
    #[error("Market data provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Market-data fetch or model fit exceeded its deadline
    #[error("Timed out waiting for {0}")]
    UpstreamTimeout(String),

    /// Provider succeeded but returned an empty series for the ticker
    #[error("No historical data found for ticker {0}")]
    NoData(String),

    /// Model fitting failed
    #[error("Model training failed: {0}")]
    TrainingFailed(String),

    /// Stored model artifact could not be deserialized
    #[error("Stored model for {ticker} is corrupt: {reason}")]
    CorruptModel { ticker: String, reason: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Filesystem failure reading or writing a model artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::NoData(_) => StatusCode::NOT_FOUND,
            ApiError::TrainingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::CorruptModel { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the forecast service.
pub type Result<T> = std::result::Result<T, ApiError>;
