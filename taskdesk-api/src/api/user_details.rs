//! User details endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use taskdesk_common::api::ParsedUserDetails;
use taskdesk_common::db::UserDetailsRecord;
use tracing::warn;

use super::json_body;
use crate::commands::{self, CreateUserDetails, UpdateUserDetails};
use crate::{queries, ApiError, ApiResult, AppState};

/// Body of `POST /api/userdetails/parse`
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub input: String,
}

/// GET /api/userdetails
pub async fn list_user_details(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserDetailsRecord>>> {
    Ok(Json(queries::list_user_details(&state.db).await?))
}

/// GET /api/userdetails/:id
pub async fn get_user_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserDetailsRecord>> {
    queries::get_user_details(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("User details {} not found", id)))
}

/// POST /api/userdetails
///
/// **Request:** `{"rawInput": "John Smith, 123 Main St, Springfield, IL 62701"}`
/// **Response:** 201 with the new id as the body
///
/// The record is stored even when parsing fails.
pub async fn create_user_details(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserDetails>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<i64>)> {
    let command = json_body(payload)?;
    let id = commands::create_user_details(&state.db, state.enricher.as_ref(), command).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

/// PUT /api/userdetails/:id
pub async fn update_user_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateUserDetails>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let command = json_body(payload)?;
    commands::update_user_details(&state.db, state.enricher.as_ref(), id, command).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/userdetails/:id
pub async fn delete_user_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    commands::delete_user_details(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/userdetails/parse
///
/// Parse preview; nothing is stored. Fields are returned in the enrichment
/// service's snake_case form.
pub async fn parse_preview(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> ApiResult<Json<ParsedUserDetails>> {
    let request = json_body(payload)?;
    if commands::is_blank(&request.input) {
        return Err(ApiError::BadRequest("input is required".to_string()));
    }

    match state.enricher.parse(&request.input).await {
        Ok(parsed) => Ok(Json(parsed)),
        Err(e) => {
            warn!(error = %e, "Parse preview failed");
            Err(ApiError::BadRequest(format!("Parsing failed: {}", e)))
        }
    }
}

/// Build user details routes (mounted under `/api`)
pub fn user_details_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/userdetails",
            get(list_user_details).post(create_user_details),
        )
        .route("/userdetails/parse", post(parse_preview))
        .route(
            "/userdetails/:id",
            get(get_user_details)
                .put(update_user_details)
                .delete(delete_user_details),
        )
}
