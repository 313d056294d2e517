//! Shared helpers for taskdesk-api integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use taskdesk_api::services::{Enricher, RemoteServiceError};
use taskdesk_api::{build_router, AppState};
use taskdesk_common::api::{Classification, ParsedUserDetails};
use taskdesk_common::db::init_memory_database;

/// In-process stand-in for the enrichment service
///
/// `None` results fail the call with a network error.
#[derive(Default)]
pub struct FakeEnricher {
    pub category: Mutex<Option<(String, f64)>>,
    pub parsed: Mutex<Option<ParsedUserDetails>>,
    pub classify_calls: AtomicUsize,
    pub parse_calls: AtomicUsize,
}

impl FakeEnricher {
    pub fn down() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn up(category: &str, confidence: f64, parsed: ParsedUserDetails) -> Arc<Self> {
        let fake = Self::default();
        *fake.category.lock().unwrap() = Some((category.to_string(), confidence));
        *fake.parsed.lock().unwrap() = Some(parsed);
        Arc::new(fake)
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Enricher for FakeEnricher {
    async fn classify(&self, text: &str) -> Result<Classification, RemoteServiceError> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        let category = self.category.lock().unwrap().clone();
        category
            .map(|(category, confidence)| Classification {
                description: text.to_string(),
                category,
                confidence,
            })
            .ok_or_else(|| RemoteServiceError::Network("connection refused".to_string()))
    }

    async fn parse(&self, _text: &str) -> Result<ParsedUserDetails, RemoteServiceError> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        self.parsed
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RemoteServiceError::Status(500, "parser crashed".to_string()))
    }
}

pub fn john_smith() -> ParsedUserDetails {
    ParsedUserDetails {
        full_name: Some("John Smith".to_string()),
        first_name: Some("John".to_string()),
        last_name: Some("Smith".to_string()),
        address_line: Some("123 Main St".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("IL".to_string()),
        zip: Some("62701".to_string()),
        confidence: Some(0.95),
        notes: None,
    }
}

/// Router over a fresh in-memory database
pub async fn setup_app(enricher: Arc<FakeEnricher>) -> axum::Router {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(db, enricher))
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    raw_json_request(method, uri, &body.to_string())
}

pub fn raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
