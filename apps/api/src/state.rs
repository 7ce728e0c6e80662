use std::sync::Arc;

use crate::ingest::placeholders::SenderIdentity;
use crate::llm_client::Completer;
use crate::repository::Repository;
use crate::scrape_client::Enricher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Enriched prospect records (`UserData`).
    pub users: Arc<dyn Repository>,
    pub prompts: Arc<dyn Repository>,
    pub pain_points: Arc<dyn Repository>,
    pub case_studies: Arc<dyn Repository>,
    pub llm: Arc<dyn Completer>,
    pub scraper: Arc<dyn Enricher>,
    pub sender: SenderIdentity,
}
