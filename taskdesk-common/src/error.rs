//! Error type shared by the TaskDesk crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or malformed TOML config
    #[error("Configuration error: {0}")]
    Config(String),

    /// No row with the requested id (HTTP 404)
    #[error("{0} not found")]
    NotFound(String),

    /// Request content failed validation (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// `NotFound` for `entity` with `id`, e.g. "Todo 7 not found"
    pub fn not_found(entity: &str, id: i64) -> Self {
        Error::NotFound(format!("{} {}", entity, id))
    }
}
