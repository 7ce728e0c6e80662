use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::templates::UseCase;

/// One uploaded prospect row plus everything enrichment and generation add to it.
///
/// Field names match the documents already present in the `UserData`
/// collection (including the `linkedIn_data` casing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "mob_no", default)]
    pub mobile_no: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub designation: String,
    #[serde(rename = "linkedin_url", default)]
    pub linkedin_url: String,
    /// Scraped profile text.
    #[serde(rename = "linkedIn_data", default)]
    pub linkedin_data: String,
    /// Scraped company website text.
    #[serde(rename = "company_data", default)]
    pub company_data: String,
    #[serde(default)]
    pub company_website: String,
    #[serde(default)]
    pub ai_output: AiOutput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiOutput {
    #[serde(rename = "coldcalls", default)]
    pub cold_calls: AiGenerated,
    #[serde(rename = "airesearch", default)]
    pub ai_research: AiGenerated,
    #[serde(rename = "questionbasedemail", default)]
    pub question_based_email: AiGenerated,
}

impl AiOutput {
    pub fn slot_mut(&mut self, use_case: UseCase) -> &mut AiGenerated {
        match use_case {
            UseCase::ColdCalls => &mut self.cold_calls,
            UseCase::AiResearch => &mut self.ai_research,
            UseCase::QuestionBasedEmail => &mut self.question_based_email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiGenerated {
    /// Empty when the completion call failed.
    #[serde(rename = "aigeneratedoutpt", default)]
    pub text: String,
    #[serde(
        rename = "generatedat",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime",
        default
    )]
    pub generated_at: DateTime<Utc>,
}

impl AiGenerated {
    pub fn now(text: String) -> Self {
        Self {
            text,
            generated_at: Utc::now(),
        }
    }
}
