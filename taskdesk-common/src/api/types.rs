//! Enrichment request/response types
//!
//! Field names follow the enrichment service's snake_case wire format.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

// ========================================
// Classification
// ========================================

/// Result of classifying a todo title
///
/// # Examples
///
/// ```
/// use taskdesk_common::api::types::Classification;
///
/// let json = r#"{"description": "Buy milk", "category": "Shopping", "confidence": 0.9}"#;
/// let c: Classification = serde_json::from_str(json).unwrap();
/// assert_eq!(c.category, "Shopping");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Classification {
    /// Text that was classified (echoed back by the service); absent or
    /// `null` decodes as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    pub category: String,

    pub confidence: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ========================================
// Parsing
// ========================================

/// Structured fields parsed from a raw name/address string
///
/// Every field is optional: the service may return partial data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ParsedUserDetails {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    /// Parser confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ParsedUserDetails {
    /// Drop a confidence value that is not a finite number in [0, 1]
    pub fn sanitized(mut self) -> Self {
        if let Some(confidence) = self.confidence {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                warn!(confidence, "Discarding out-of-range parse confidence");
                self.confidence = None;
            }
        }
        self
    }
}
