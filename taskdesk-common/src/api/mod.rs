//! Shared API types
//!
//! One data-transfer shape per enrichment concept, used by the enrichment
//! client, the command handlers and the preview endpoints alike.

pub mod types;

pub use types::{Classification, ParsedUserDetails};
