use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prompt as saved through the prompt library endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrompt {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt_rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /saveprompt`. Timestamps are always set server-side.
#[derive(Debug, Deserialize)]
pub struct SavePromptRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub prompt_rule: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
}

impl SavePromptRequest {
    pub fn into_prompt(self, now: DateTime<Utc>) -> StoredPrompt {
        StoredPrompt {
            name: self.name,
            prompt: self.prompt,
            purpose: self.purpose,
            prompt_rule: self.prompt_rule,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /updateprompt/:promptId`.
#[derive(Debug, Deserialize)]
pub struct UpdatePromptRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub prompt_rule: String,
    #[serde(default)]
    pub updated_by: String,
}

/// Projection the template catalog reads; only the text matters there.
#[derive(Debug, Deserialize)]
pub struct PromptTextView {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub prompt_rule: String,
}
