//! Query handlers (read-only)
//!
//! `None` is the not-found signal; the HTTP layer turns it into 404.

use sqlx::SqlitePool;
use taskdesk_common::db::{TodoItem, UserDetailsRecord};
use taskdesk_common::Result;

use crate::db;

pub async fn list_todos(pool: &SqlitePool) -> Result<Vec<TodoItem>> {
    db::todos::list_todos(pool).await
}

pub async fn get_todo(pool: &SqlitePool, id: i64) -> Result<Option<TodoItem>> {
    db::todos::load_todo(pool, id).await
}

pub async fn list_user_details(pool: &SqlitePool) -> Result<Vec<UserDetailsRecord>> {
    db::user_details::list_user_details(pool).await
}

pub async fn get_user_details(pool: &SqlitePool, id: i64) -> Result<Option<UserDetailsRecord>> {
    db::user_details::load_user_details(pool, id).await
}
