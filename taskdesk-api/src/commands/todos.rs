//! Todo commands

use serde::Deserialize;
use sqlx::SqlitePool;
use taskdesk_common::db::TodoItem;
use taskdesk_common::{Error, Result};
use tracing::{info, warn};

use super::is_blank;
use crate::db;
use crate::services::Enricher;

/// Body of `POST /api/todos`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
}

/// Body of `PUT /api/todos/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: String,
    pub is_complete: bool,
}

/// Best-effort category for `title`; `None` if blank or the call failed
async fn classify_title(enricher: &dyn Enricher, title: &str) -> Option<String> {
    if is_blank(title) {
        return None;
    }

    match enricher.classify(title).await {
        Ok(classification) => Some(classification.category),
        Err(e) => {
            warn!(title_len = title.len(), error = %e, "Classification failed, continuing without category");
            None
        }
    }
}

/// Create a todo, classifying its title when possible
pub async fn create_todo(
    pool: &SqlitePool,
    enricher: &dyn Enricher,
    command: CreateTodo,
) -> Result<i64> {
    let category = classify_title(enricher, &command.title).await;

    let todo = TodoItem::new(command.title, category);
    let id = db::todos::insert_todo(pool, &todo).await?;

    info!(id, category = ?todo.category, "Created todo");
    Ok(id)
}

/// Update title and completion; re-classify only if the title changed
pub async fn update_todo(
    pool: &SqlitePool,
    enricher: &dyn Enricher,
    id: i64,
    command: UpdateTodo,
) -> Result<()> {
    let mut todo = db::todos::load_todo(pool, id)
        .await?
        .ok_or_else(|| Error::not_found("Todo", id))?;

    let title_changed = todo.title != command.title;
    todo.title = command.title;
    todo.is_complete = command.is_complete;

    if title_changed {
        // A failed or skipped classification keeps the previous category
        if let Some(category) = classify_title(enricher, &todo.title).await {
            todo.category = Some(category);
        }
    }

    if !db::todos::update_todo(pool, &todo).await? {
        // Deleted between load and write
        return Err(Error::not_found("Todo", id));
    }

    info!(id, title_changed, "Updated todo");
    Ok(())
}

/// Delete a todo; a missing id is not an error
pub async fn delete_todo(pool: &SqlitePool, id: i64) -> Result<()> {
    let existed = db::todos::delete_todo(pool, id).await?;
    info!(id, existed, "Deleted todo");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEnricher;
    use taskdesk_common::db::init_memory_database;

    fn create(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
        }
    }

    fn update(title: &str, is_complete: bool) -> UpdateTodo {
        UpdateTodo {
            title: title.to_string(),
            is_complete,
        }
    }

    #[tokio::test]
    async fn test_create_stores_classified_category() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Shopping", 0.9);

        let id = create_todo(&pool, &enricher, create("Buy milk")).await.unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.category.as_deref(), Some("Shopping"));
        assert!(!todo.is_complete);
    }

    #[tokio::test]
    async fn test_create_survives_classification_failure() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::failing();

        let id = create_todo(&pool, &enricher, create("Buy milk")).await.unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert!(todo.category.is_none());
        assert_eq!(enricher.classify_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_blank_title_skips_classification() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Work", 0.8);

        let id = create_todo(&pool, &enricher, create("   ")).await.unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(todo.title, "   ");
        assert!(todo.category.is_none());
        assert_eq!(enricher.classify_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_same_title_does_not_reclassify() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Home", 0.7);
        let id = create_todo(&pool, &enricher, create("Clean kitchen")).await.unwrap();

        enricher.set_classification(Some(("Work", 0.9)));
        update_todo(&pool, &enricher, id, update("Clean kitchen", true))
            .await
            .unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert!(todo.is_complete);
        assert_eq!(todo.category.as_deref(), Some("Home"));
        assert_eq!(enricher.classify_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_changed_title_reclassifies() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Home", 0.7);
        let id = create_todo(&pool, &enricher, create("Clean kitchen")).await.unwrap();

        enricher.set_classification(Some(("Work", 0.9)));
        update_todo(&pool, &enricher, id, update("Write report", false))
            .await
            .unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(todo.title, "Write report");
        assert_eq!(todo.category.as_deref(), Some("Work"));
        assert_eq!(enricher.classify_calls(), 2);
    }

    #[tokio::test]
    async fn test_update_failed_reclassification_keeps_category() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Home", 0.7);
        let id = create_todo(&pool, &enricher, create("Clean kitchen")).await.unwrap();

        enricher.set_classification(None);
        update_todo(&pool, &enricher, id, update("Clean garage", false))
            .await
            .unwrap();

        let todo = db::todos::load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(todo.title, "Clean garage");
        assert_eq!(todo.category.as_deref(), Some("Home"));
    }

    #[tokio::test]
    async fn test_update_missing_todo_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let enricher = ScriptedEnricher::classifying("Home", 0.7);

        let result = update_todo(&pool, &enricher, 404, update("anything", false)).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(enricher.classify_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_todo_succeeds() {
        let pool = init_memory_database().await.unwrap();
        assert!(delete_todo(&pool, 12345).await.is_ok());
    }
}
