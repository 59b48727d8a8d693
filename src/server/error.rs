//! HTTP error responses
//!
//! Maps fatal invocation errors to status codes:
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthorized (bad or missing credential) | 401 |
//! | MissingRecipient | 400 |
//! | Configuration, Delivery, anything else | 500 |
//!
//! Every body is `{"error": "<message>"}`.

use crate::domain::FerryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error returned by the export handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential missing, malformed or rejected (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// Caller has no contactable address (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// Delivery or configuration failure (HTTP 500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(m) | ApiError::BadRequest(m) | ApiError::Internal(m) => m,
        }
    }
}

impl From<FerryError> for ApiError {
    fn from(err: FerryError) -> Self {
        match err {
            FerryError::Unauthorized(_) => ApiError::Unauthorized(err.to_string()),
            FerryError::MissingRecipient(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.message(), "Request rejected");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
