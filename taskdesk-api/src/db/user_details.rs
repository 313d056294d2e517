//! User details persistence (`user_inputs` table)

use sqlx::SqlitePool;
use taskdesk_common::db::UserDetailsRecord;
use taskdesk_common::Result;

const SELECT_COLUMNS: &str = r#"
    SELECT id, raw_input, full_name, first_name, last_name, address_line,
           city, state, zip, confidence, notes, created_at, updated_at
    FROM user_inputs
"#;

/// Insert a record and return its new id
pub async fn insert_user_details(pool: &SqlitePool, record: &UserDetailsRecord) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_inputs (
            raw_input, full_name, first_name, last_name, address_line,
            city, state, zip, confidence, notes, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.raw_input)
    .bind(&record.full_name)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.address_line)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.zip)
    .bind(record.confidence)
    .bind(&record.notes)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load record by id
pub async fn load_user_details(pool: &SqlitePool, id: i64) -> Result<Option<UserDetailsRecord>> {
    let record = sqlx::query_as::<_, UserDetailsRecord>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// All records in storage order
pub async fn list_user_details(pool: &SqlitePool) -> Result<Vec<UserDetailsRecord>> {
    let records = sqlx::query_as::<_, UserDetailsRecord>(&format!("{} ORDER BY id", SELECT_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(records)
}

/// Overwrite a stored record (everything except `created_at`)
///
/// Returns false if no row has that id.
pub async fn update_user_details(pool: &SqlitePool, record: &UserDetailsRecord) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE user_inputs
        SET raw_input = ?, full_name = ?, first_name = ?, last_name = ?,
            address_line = ?, city = ?, state = ?, zip = ?,
            confidence = ?, notes = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.raw_input)
    .bind(&record.full_name)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.address_line)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.zip)
    .bind(record.confidence)
    .bind(&record.notes)
    .bind(record.updated_at)
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete record by id; returns false if it did not exist
pub async fn delete_user_details(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_inputs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
