//! Todo persistence

use sqlx::SqlitePool;
use taskdesk_common::db::TodoItem;
use taskdesk_common::Result;

/// Insert a todo and return its new id
pub async fn insert_todo(pool: &SqlitePool, todo: &TodoItem) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO todos (title, category, is_complete)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&todo.title)
    .bind(&todo.category)
    .bind(todo.is_complete)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load todo by id
pub async fn load_todo(pool: &SqlitePool, id: i64) -> Result<Option<TodoItem>> {
    let todo = sqlx::query_as::<_, TodoItem>(
        "SELECT id, title, category, is_complete FROM todos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}

/// All todos in storage order
pub async fn list_todos(pool: &SqlitePool) -> Result<Vec<TodoItem>> {
    let todos = sqlx::query_as::<_, TodoItem>(
        "SELECT id, title, category, is_complete FROM todos ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// Overwrite a stored todo; returns false if no row has that id
pub async fn update_todo(pool: &SqlitePool, todo: &TodoItem) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET title = ?, category = ?, is_complete = ?
        WHERE id = ?
        "#,
    )
    .bind(&todo.title)
    .bind(&todo.category)
    .bind(todo.is_complete)
    .bind(todo.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete todo by id; returns false if it did not exist
pub async fn delete_todo(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdesk_common::db::init_memory_database;

    #[tokio::test]
    async fn test_insert_and_load_todo() {
        let pool = init_memory_database().await.unwrap();

        let todo = TodoItem::new("Buy milk".to_string(), Some("Shopping".to_string()));
        let id = insert_todo(&pool, &todo).await.expect("Failed to insert todo");

        let loaded = load_todo(&pool, id)
            .await
            .expect("Failed to load todo")
            .expect("Todo not found");

        assert_eq!(loaded.id, id);
        assert_eq!(loaded.title, "Buy milk");
        assert_eq!(loaded.category.as_deref(), Some("Shopping"));
        assert!(!loaded.is_complete);
    }

    #[tokio::test]
    async fn test_load_missing_todo_is_none() {
        let pool = init_memory_database().await.unwrap();
        assert!(load_todo(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_todos_in_insert_order() {
        let pool = init_memory_database().await.unwrap();
        for title in ["first", "second", "third"] {
            insert_todo(&pool, &TodoItem::new(title.to_string(), None))
                .await
                .unwrap();
        }

        let titles: Vec<String> = list_todos(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_todo() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_todo(&pool, &TodoItem::new("draft".to_string(), None))
            .await
            .unwrap();

        let mut todo = load_todo(&pool, id).await.unwrap().unwrap();
        todo.title = "final".to_string();
        todo.is_complete = true;
        assert!(update_todo(&pool, &todo).await.unwrap());

        let loaded = load_todo(&pool, id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "final");
        assert!(loaded.is_complete);
    }

    #[tokio::test]
    async fn test_update_missing_todo_reports_false() {
        let pool = init_memory_database().await.unwrap();
        let mut ghost = TodoItem::new("ghost".to_string(), None);
        ghost.id = 99;
        assert!(!update_todo(&pool, &ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_todo() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_todo(&pool, &TodoItem::new("gone".to_string(), None))
            .await
            .unwrap();

        assert!(delete_todo(&pool, id).await.unwrap());
        assert!(!delete_todo(&pool, id).await.unwrap());
        assert!(load_todo(&pool, id).await.unwrap().is_none());
    }
}
