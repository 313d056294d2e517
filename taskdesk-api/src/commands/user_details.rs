//! User details commands
//!
//! `raw_input` is stored exactly as received, whatever the parser does.

use serde::Deserialize;
use sqlx::SqlitePool;
use taskdesk_common::api::ParsedUserDetails;
use taskdesk_common::db::{UserDetailsRecord, RAW_INPUT_MAX_CHARS};
use taskdesk_common::{Error, Result};
use tracing::{info, warn};

use super::is_blank;
use crate::db;
use crate::services::Enricher;

/// Body of `POST /api/userdetails`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDetails {
    pub raw_input: String,
}

/// Body of `PUT /api/userdetails/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDetails {
    pub raw_input: String,
}

fn validate_raw_input(raw_input: &str) -> Result<()> {
    let len = raw_input.chars().count();
    if len > RAW_INPUT_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "rawInput is {} characters, maximum is {}",
            len, RAW_INPUT_MAX_CHARS
        )));
    }
    Ok(())
}

/// Best-effort parse of `raw_input`; `None` if blank or the call failed
async fn parse_raw_input(enricher: &dyn Enricher, raw_input: &str) -> Option<ParsedUserDetails> {
    if is_blank(raw_input) {
        return None;
    }

    match enricher.parse(raw_input).await {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(input_len = raw_input.len(), error = %e, "Parsing failed, storing raw input only");
            None
        }
    }
}

/// Create a record, parsing the raw input when possible
pub async fn create_user_details(
    pool: &SqlitePool,
    enricher: &dyn Enricher,
    command: CreateUserDetails,
) -> Result<i64> {
    validate_raw_input(&command.raw_input)?;

    let parsed = parse_raw_input(enricher, &command.raw_input).await;
    let was_parsed = parsed.is_some();

    let mut record = UserDetailsRecord::new(command.raw_input);
    if let Some(parsed) = parsed {
        record.apply_parsed(parsed);
    }

    let id = db::user_details::insert_user_details(pool, &record).await?;

    info!(id, parsed = was_parsed, "Created user details");
    Ok(id)
}

/// Replace the raw input; re-parse only if it changed
pub async fn update_user_details(
    pool: &SqlitePool,
    enricher: &dyn Enricher,
    id: i64,
    command: UpdateUserDetails,
) -> Result<()> {
    validate_raw_input(&command.raw_input)?;

    let mut record = db::user_details::load_user_details(pool, id)
        .await?
        .ok_or_else(|| Error::not_found("User details", id))?;

    let input_changed = record.raw_input != command.raw_input;
    record.raw_input = command.raw_input;
    record.updated_at = Some(taskdesk_common::time::now());

    if input_changed {
        // A failed or skipped parse keeps the previous structured fields
        if let Some(parsed) = parse_raw_input(enricher, &record.raw_input).await {
            record.apply_parsed(parsed);
        }
    }

    if !db::user_details::update_user_details(pool, &record).await? {
        return Err(Error::not_found("User details", id));
    }

    info!(id, input_changed, "Updated user details");
    Ok(())
}

/// Delete a record; a missing id is not an error
pub async fn delete_user_details(pool: &SqlitePool, id: i64) -> Result<()> {
    let existed = db::user_details::delete_user_details(pool, id).await?;
    info!(id, existed, "Deleted user details");
    Ok(())
}
