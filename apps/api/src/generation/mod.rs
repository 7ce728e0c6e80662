//! Free-form generation: one system prompt, one task, optional research.

pub mod handlers;

/// Replaced in the task with the scraped profile when research is requested.
pub const RESEARCH_TOKEN: &str = "**research**";
