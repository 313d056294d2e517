//! Enrichment service HTTP client
//!
//! Two JSON-over-HTTP calls against the external classification/parsing
//! service:
//! - `POST {base}/classify` with `{"description": ...}`
//! - `POST {base}/parse` with `{"input": ...}`
//!
//! Response field names are matched case-insensitively. No retries and no
//! caching: every call is a fresh round trip.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use taskdesk_common::api::{Classification, ParsedUserDetails};
use taskdesk_common::config::EnrichmentSettings;

use super::enrichment::{Enricher, RemoteServiceError};

const USER_AGENT: &str = concat!("taskdesk-api/", env!("CARGO_PKG_VERSION"));

/// Enrichment service client
pub struct EnrichmentClient {
    http_client: reqwest::Client,
    classify_url: String,
    parse_url: String,
}

impl EnrichmentClient {
    /// Create new enrichment client
    pub fn new(settings: &EnrichmentSettings) -> Result<Self, RemoteServiceError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| RemoteServiceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            classify_url: join_url(&settings.base_url, &settings.classify_path),
            parse_url: join_url(&settings.base_url, &settings.parse_path),
        })
    }

    pub fn classify_url(&self) -> &str {
        &self.classify_url
    }

    pub fn parse_url(&self) -> &str {
        &self.parse_url
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: Value,
    ) -> Result<T, RemoteServiceError> {
        tracing::debug!(url = %url, "Calling enrichment service");

        let response = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteServiceError::Status(status.as_u16(), error_text));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        decode_case_insensitive(&bytes)
    }
}

#[async_trait]
impl Enricher for EnrichmentClient {
    async fn classify(&self, text: &str) -> Result<Classification, RemoteServiceError> {
        let mut classification: Classification = self
            .post_json(&self.classify_url, json!({ "description": text }))
            .await?;

        if classification.description.is_empty() {
            classification.description = text.to_string();
        }

        tracing::debug!(
            category = %classification.category,
            confidence = classification.confidence,
            "Classification received"
        );

        Ok(classification)
    }

    async fn parse(&self, text: &str) -> Result<ParsedUserDetails, RemoteServiceError> {
        let parsed: ParsedUserDetails = self
            .post_json(&self.parse_url, json!({ "input": text }))
            .await?;

        tracing::debug!(
            has_name = parsed.full_name.is_some(),
            confidence = ?parsed.confidence,
            "Parse result received"
        );

        Ok(parsed.sanitized())
    }
}

fn transport_error(e: reqwest::Error) -> RemoteServiceError {
    if e.is_timeout() {
        RemoteServiceError::Timeout(e.to_string())
    } else {
        RemoteServiceError::Network(e.to_string())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Deserialize `bytes` after lowercasing every object key
fn decode_case_insensitive<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RemoteServiceError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| RemoteServiceError::Decode(e.to_string()))?;

    serde_json::from_value(lowercase_keys(value))
        .map_err(|e| RemoteServiceError::Decode(e.to_string()))
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
