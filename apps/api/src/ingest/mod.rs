//! Bulk prospect ingestion: spreadsheet upload, enrichment, generation.

pub mod handlers;
pub mod pipeline;
pub mod placeholders;
pub mod prompts;
pub mod sheet;
pub mod templates;
