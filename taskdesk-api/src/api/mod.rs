//! HTTP API handlers for taskdesk-api

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::ApiError;

pub mod buildinfo;
pub mod health;
pub mod todos;
pub mod user_details;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use todos::todo_routes;
pub use user_details::user_details_routes;

/// Unwrap a JSON body, turning axum's rejection into a 400 in our error shape
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
