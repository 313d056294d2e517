//! # TaskDesk Common Library
//!
//! Shared code for the TaskDesk services including:
//! - Database schema and row models (todos, user inputs)
//! - Enrichment data-transfer types
//! - Configuration loading and root folder resolution
//! - Error types

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
