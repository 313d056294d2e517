//! Enrichment seam
//!
//! Handlers depend on [`Enricher`] rather than on the HTTP client directly,
//! so the dependency is passed in explicitly and can be swapped in tests.

use async_trait::async_trait;
use taskdesk_common::api::{Classification, ParsedUserDetails};
use thiserror::Error;

/// Any failure in an enrichment round trip
#[derive(Debug, Error)]
pub enum RemoteServiceError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Service answered with a non-success status
    #[error("Service returned {0}: {1}")]
    Status(u16, String),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Text classification and parsing provider
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Classify a todo title into a category
    async fn classify(&self, text: &str) -> Result<Classification, RemoteServiceError>;

    /// Parse a raw name/address string into structured fields
    async fn parse(&self, text: &str) -> Result<ParsedUserDetails, RemoteServiceError>;
}
