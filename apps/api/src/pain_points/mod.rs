//! Per-role pain points and the value proposition that answers them.
//!
//! The value proposition stored here is what the ingestion pipeline
//! substitutes for `**sender_value_propositions**` when a prospect's
//! designation matches the role exactly.

pub mod handlers;
pub mod prompts;

use crate::llm_client::{Completer, LlmError};

const SECTION_MARKER: &str = "How Initializ.ai Helps:";
const SHORT_SECTION_MARKER: &str = "How Initializ Helps:";

/// Strips markdown emphasis and splits generated text at the value
/// proposition heading. Without a heading the whole text is pain points.
pub fn split_content(content: &str) -> (String, String) {
    let cleaned = content
        .replace('*', "")
        .replace(SHORT_SECTION_MARKER, SECTION_MARKER);

    let mut parts = cleaned.split(SECTION_MARKER);
    let pain_points = parts.next().unwrap_or_default().to_string();
    let value_proposition = parts.next().unwrap_or_default().to_string();
    (pain_points, value_proposition)
}

/// One completion for `role`, split into `(pain_points, value_proposition)`.
pub async fn generate(completer: &dyn Completer, role: &str) -> Result<(String, String), LlmError> {
    let text = completer.complete(prompts::PAIN_POINTS_RULE, role).await?;
    Ok(split_content(&text))
}
