//! HTTP error mapping for taskdesk-api
//!
//! Every failure leaves the service as `{"error": {"code", "message"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use taskdesk_common::Error as CommonError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No record with the requested id (404)
    #[error("{0}")]
    NotFound(String),

    /// Malformed body or failed preview (400)
    #[error("{0}")]
    BadRequest(String),

    /// Error from the command/query layer
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Common(CommonError::Database(err))
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) | ApiError::Common(CommonError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            ApiError::BadRequest(_) | ApiError::Common(CommonError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            ApiError::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
            ApiError::Common(CommonError::InvalidInput(msg)) => msg,
            ApiError::Common(err) => err.to_string(),
        };

        if status.is_server_error() {
            error!(code, "{}", message);
        }

        (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
