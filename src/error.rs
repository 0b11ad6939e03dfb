//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pluggy::{ErrorKind, PluggyError};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Upstream errors
    #[error(transparent)]
    Pluggy(#[from] PluggyError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),

            // Every upstream failure is a 500 carrying the upstream text
            AppError::Pluggy(err) => {
                tracing::error!("Pluggy error: {}", err);
                let code = match err.kind() {
                    ErrorKind::Config => "config_error",
                    ErrorKind::Auth => "auth_error",
                    ErrorKind::Upstream => "upstream_error",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
