//! Database models
//!
//! Row shapes double as the JSON projections returned by the HTTP API
//! (camelCase on the wire, snake_case in the database).

use crate::api::ParsedUserDetails;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of `raw_input`, in characters
pub const RAW_INPUT_MAX_CHARS: usize = 1000;

/// Todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    /// Set by classification; `None` if it failed or was never attempted
    pub category: Option<String>,
    pub is_complete: bool,
}

impl TodoItem {
    /// New, not yet persisted todo (id assigned on insert)
    pub fn new(title: String, category: Option<String>) -> Self {
        Self {
            id: 0,
            title,
            category,
            is_complete: false,
        }
    }
}

/// User details record: raw input plus best-effort parsed fields
///
/// `raw_input` is authoritative and always stored verbatim. Everything else
/// except the timestamps is derived data and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsRecord {
    pub id: i64,
    pub raw_input: String,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub confidence: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserDetailsRecord {
    /// New, not yet persisted record with no structured fields
    pub fn new(raw_input: String) -> Self {
        Self {
            id: 0,
            raw_input,
            full_name: None,
            first_name: None,
            last_name: None,
            address_line: None,
            city: None,
            state: None,
            zip: None,
            confidence: None,
            notes: None,
            created_at: crate::time::now(),
            updated_at: None,
        }
    }

    /// Overwrite every structured field with a parse result
    pub fn apply_parsed(&mut self, parsed: ParsedUserDetails) {
        self.full_name = parsed.full_name;
        self.first_name = parsed.first_name;
        self.last_name = parsed.last_name;
        self.address_line = parsed.address_line;
        self.city = parsed.city;
        self.state = parsed.state;
        self.zip = parsed.zip;
        self.confidence = parsed.confidence;
        self.notes = parsed.notes;
    }
}
