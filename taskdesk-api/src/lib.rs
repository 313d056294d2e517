//! taskdesk-api library
//!
//! HTTP service for todos and free-text user details. Writes are enriched by
//! an external classification/parsing service when it is reachable, and
//! persisted either way.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod commands;
pub mod db;
pub mod error;
pub mod queries;
pub mod services;

#[cfg(test)]
mod testing;

pub use error::{ApiError, ApiResult};
use services::Enricher;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Classification and parsing backend
    pub enricher: Arc<dyn Enricher>,
    /// Server start time, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            db,
            enricher,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api_routes = Router::new()
        .merge(api::todo_routes())
        .merge(api::user_details_routes())
        .route("/buildinfo", get(api::get_build_info));

    Router::new()
        .nest("/api", api_routes)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
