//! Client for the external scraping service.
//!
//! `POST <SCRAPPERURI>/scrape {"url": ...}` answers with the chat-completion
//! shape; the first choice carries the extracted text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::ChatCompletion;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no URL to scrape")]
    EmptyUrl,

    #[error("scrape request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed scraper response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no content found in the scraper response")]
    NoContent,
}

/// Enrichment seam: URL in, extracted text out.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, url: &str) -> Result<String, ScrapeError>;
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[derive(Clone)]
pub struct ScrapeClient {
    client: Client,
    endpoint: String,
}

impl ScrapeClient {
    pub fn new(base_uri: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: scrape_endpoint(base_uri),
        })
    }
}

fn scrape_endpoint(base_uri: &str) -> String {
    format!("{}/scrape", base_uri.trim_end_matches('/'))
}

#[async_trait]
impl Enricher for ScrapeClient {
    async fn enrich(&self, url: &str) -> Result<String, ScrapeError> {
        if url.trim().is_empty() {
            return Err(ScrapeError::EmptyUrl);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let text = parse_scrape_body(&raw)?;
        debug!("Scraped {url}: {} chars", text.len());
        Ok(text)
    }
}

fn parse_scrape_body(raw: &str) -> Result<String, ScrapeError> {
    let parsed: ChatCompletion = serde_json::from_str(raw)?;
    parsed.first_content().ok_or(ScrapeError::NoContent)
}
