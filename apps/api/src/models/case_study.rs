use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudy {
    pub url: String,
    pub researched_data: String,
}

#[derive(Debug, Deserialize)]
pub struct CaseStudyRequest {
    #[serde(default)]
    pub url: String,
}
