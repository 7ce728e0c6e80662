use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A role's generated pain points and the value proposition that answers them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainPoint {
    pub role: String,
    #[serde(rename = "pain_points")]
    pub pain_points: String,
    pub value_proposition: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Projection used by the value-proposition lookup; tolerates documents
/// whose `created_at` is missing or not a date.
#[derive(Debug, Deserialize)]
pub struct ValuePropositionView {
    #[serde(default)]
    pub value_proposition: String,
}

#[derive(Debug, Deserialize)]
pub struct PainPointRequest {
    #[serde(default)]
    pub role: String,
}
