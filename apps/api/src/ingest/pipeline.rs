//! Row Ingestion Pipeline: enrich, generate and persist uploaded prospects.
//!
//! Per row: profile + company scrape (concurrent, joined) → value-proposition
//! lookup → research → cold call → email (sequential) → one insert.
//!
//! Rows are independent and processed one after another. Nothing inside a
//! row is fatal to the upload: scrape, completion and insert failures are
//! logged and counted, and the next row runs regardless.
//!
//! A spawned run owns everything it touches, so it finishes every row even
//! if the caller that started it goes away.

use std::sync::Arc;

use mongodb::bson;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::ingest::placeholders::{substitute, SenderIdentity};
use crate::ingest::templates::{PromptCatalog, UseCase};
use crate::llm_client::Completer;
use crate::models::pain_point::ValuePropositionView;
use crate::models::record::{AiGenerated, UserRecord};
use crate::repository::{Field, Filter, Repository, StoreError};
use crate::scrape_client::Enricher;
use crate::state::AppState;

/// Aggregate outcome of one upload. Row-level errors only reach the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub rows: usize,
    pub persisted: usize,
    pub failed: usize,
}

pub struct IngestPipeline {
    users: Arc<dyn Repository>,
    pain_points: Arc<dyn Repository>,
    enricher: Arc<dyn Enricher>,
    completer: Arc<dyn Completer>,
    sender: SenderIdentity,
}

impl IngestPipeline {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            pain_points: state.pain_points.clone(),
            enricher: state.scraper.clone(),
            completer: state.llm.clone(),
            sender: state.sender.clone(),
        }
    }

    /// Runs on its own task. Dropping the handle detaches the run; it does
    /// not cancel it.
    pub fn spawn(
        self,
        records: Vec<UserRecord>,
        catalog: PromptCatalog,
    ) -> JoinHandle<IngestReport> {
        tokio::spawn(async move { self.run(records, &catalog).await })
    }

    pub async fn run(&self, records: Vec<UserRecord>, catalog: &PromptCatalog) -> IngestReport {
        let mut report = IngestReport {
            rows: records.len(),
            ..Default::default()
        };

        for (row, record) in records.into_iter().enumerate() {
            let name = record.name.clone();
            match self.process(record, catalog).await {
                Ok(()) => report.persisted += 1,
                Err(e) => {
                    error!("Error occurred while inserting user data for row {} ({name}): {e}", row + 1);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Upload processed: {} rows, {} persisted, {} failed",
            report.rows, report.persisted, report.failed
        );
        report
    }

    /// Only the insert can fail a row.
    async fn process(&self, mut record: UserRecord, catalog: &PromptCatalog) -> Result<(), StoreError> {
        self.enrich(&mut record).await;
        self.generate(&mut record, catalog).await;

        let document = bson::to_document(&record)?;
        self.users.insert_one(document).await?;
        Ok(())
    }

    /// Both scrapes are in flight together; neither result is written until
    /// both have finished.
    async fn enrich(&self, record: &mut UserRecord) {
        let company_url = company_url(record);
        let (profile, company) = tokio::join!(
            self.scrape("LinkedIn", &record.name, Some(record.linkedin_url.as_str())),
            self.scrape("company", &record.company, company_url.as_deref()),
        );

        if let Some(text) = profile {
            record.linkedin_data = text;
        }
        if let Some(text) = company {
            record.company_data = text;
        }
    }

    async fn scrape(&self, what: &str, who: &str, url: Option<&str>) -> Option<String> {
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let Some(url) = url else {
            debug!("No {what} URL for {who}, skipping enrichment");
            return None;
        };
        match self.enricher.enrich(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Error fetching {what} data for {who}: {e}");
                None
            }
        }
    }

    async fn generate(&self, record: &mut UserRecord, catalog: &PromptCatalog) {
        let value_proposition = self.value_proposition(&record.designation).await;

        for use_case in UseCase::GENERATION_ORDER {
            let template = catalog.get(use_case);
            let prompt = substitute(
                &template.template,
                record,
                value_proposition.as_deref(),
                &self.sender,
            );

            let text = match self.completer.complete(&template.rule, &prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("{} generation failed for {}: {e}", use_case.name(), record.name);
                    String::new()
                }
            };
            *record.ai_output.slot_mut(use_case) = AiGenerated::now(text);
        }
    }

    /// `None` when the role has no stored value proposition or the lookup fails.
    async fn value_proposition(&self, role: &str) -> Option<String> {
        let found = match self.pain_points.find_one(Filter::eq(Field::Role, role)).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Error fetching pain points for role '{role}': {e}");
                return None;
            }
        };

        found
            .and_then(|doc| bson::from_document::<ValuePropositionView>(doc).ok())
            .map(|view| view.value_proposition)
            .filter(|vp| !vp.trim().is_empty())
    }
}

/// The company website when given, otherwise `https://www.<email domain>`.
pub fn company_url(record: &UserRecord) -> Option<String> {
    let website = record.company_website.trim();
    if !website.is_empty() {
        return Some(website.to_string());
    }
    record
        .email
        .split_once('@')
        .map(|(_, domain)| domain.trim())
        .filter(|domain| !domain.is_empty())
        .map(|domain| format!("https://www.{domain}"))
}
