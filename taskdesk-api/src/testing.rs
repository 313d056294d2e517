//! Scripted [`Enricher`] for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use taskdesk_common::api::{Classification, ParsedUserDetails};

use crate::services::{Enricher, RemoteServiceError};

/// Returns preset results; `None` makes the call fail as if the service were down
#[derive(Default)]
pub struct ScriptedEnricher {
    classification: Mutex<Option<(String, f64)>>,
    parsed: Mutex<Option<ParsedUserDetails>>,
    classify_calls: AtomicUsize,
    parse_calls: AtomicUsize,
}

impl ScriptedEnricher {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn classifying(category: &str, confidence: f64) -> Self {
        let enricher = Self::default();
        enricher.set_classification(Some((category, confidence)));
        enricher
    }

    pub fn parsing(parsed: ParsedUserDetails) -> Self {
        let enricher = Self::default();
        enricher.set_parsed(Some(parsed));
        enricher
    }

    pub fn set_classification(&self, result: Option<(&str, f64)>) {
        *self.classification.lock().unwrap() = result.map(|(c, conf)| (c.to_string(), conf));
    }

    pub fn set_parsed(&self, result: Option<ParsedUserDetails>) {
        *self.parsed.lock().unwrap() = result;
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Enricher for ScriptedEnricher {
    async fn classify(&self, text: &str) -> Result<Classification, RemoteServiceError> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        match self.classification.lock().unwrap().clone() {
            Some((category, confidence)) => Ok(Classification {
                description: text.to_string(),
                category,
                confidence,
            }),
            None => Err(RemoteServiceError::Network("service down".to_string())),
        }
    }

    async fn parse(&self, _text: &str) -> Result<ParsedUserDetails, RemoteServiceError> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        self.parsed
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RemoteServiceError::Network("service down".to_string()))
    }
}
