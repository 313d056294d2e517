//! Todo endpoints
//!
//! `POST /api/todos/classify` is a preview: it calls the enrichment service
//! and returns the classification without storing anything.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use taskdesk_common::api::Classification;
use taskdesk_common::db::TodoItem;
use tracing::warn;

use super::json_body;
use crate::commands::{self, CreateTodo, UpdateTodo};
use crate::{queries, ApiError, ApiResult, AppState};

/// Body of `POST /api/todos/classify`
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub description: String,
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoItem>>> {
    Ok(Json(queries::list_todos(&state.db).await?))
}

/// GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TodoItem>> {
    queries::get_todo(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Todo {} not found", id)))
}

/// POST /api/todos
///
/// **Request:** `{"title": "Buy milk"}`
/// **Response:** 201 with the new id as the body
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<i64>)> {
    let command = json_body(payload)?;
    let id = commands::create_todo(&state.db, state.enricher.as_ref(), command).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

/// PUT /api/todos/:id
///
/// **Request:** `{"title": "...", "isComplete": true}`
/// **Errors:** 404 if the todo does not exist
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let command = json_body(payload)?;
    commands::update_todo(&state.db, state.enricher.as_ref(), id, command).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    commands::delete_todo(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/todos/classify
///
/// **Request:** `{"description": "Buy milk"}`
/// **Response:** `{"description": "Buy milk", "category": "Shopping", "confidence": 0.9}`
///
/// **Errors:**
/// - 400 Bad Request: blank description, or the enrichment service failed
pub async fn classify_preview(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<Classification>> {
    let request = json_body(payload)?;
    if commands::is_blank(&request.description) {
        return Err(ApiError::BadRequest("description is required".to_string()));
    }

    match state.enricher.classify(&request.description).await {
        Ok(classification) => Ok(Json(classification)),
        Err(e) => {
            warn!(error = %e, "Classification preview failed");
            Err(ApiError::BadRequest(format!("Classification failed: {}", e)))
        }
    }
}

/// Build todo routes (mounted under `/api`)
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/classify", post(classify_preview))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
