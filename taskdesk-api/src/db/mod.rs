//! Database access layer for taskdesk-api
//!
//! One auto-committing statement per call; no multi-entity transactions.

use std::path::Path;

use sqlx::SqlitePool;
use taskdesk_common::Result;

pub mod todos;
pub mod user_details;

/// Open the service database, creating file and schema on first run
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    tracing::debug!("Connecting to database: {}", db_path.display());
    taskdesk_common::db::init_database(db_path).await
}
