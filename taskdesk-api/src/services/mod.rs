//! Outbound service clients

pub mod enrichment;
pub mod enrichment_client;

pub use enrichment::{Enricher, RemoteServiceError};
pub use enrichment_client::EnrichmentClient;
