use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use mongodb::bson::{self, oid::ObjectId};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::models::case_study::{CaseStudy, CaseStudyRequest};
use crate::models::documents_to_json;
use crate::repository::{Filter, StoreError};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /initializ/v1/ai/casestudy
///
/// Scrapes the page and stores the extracted text; answers with that text.
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<CaseStudyRequest>, JsonRejection>,
) -> Result<ApiResponse<String>, AppError> {
    let Json(request) = payload?;
    let url = request.url.trim();

    let researched_data = state.scraper.enrich(url).await.map_err(|e| {
        warn!("Case study scrape failed for {url}: {e}");
        AppError::Upstream("Error occurred while scraping the data".to_string())
    })?;

    let case_study = CaseStudy {
        url: url.to_string(),
        researched_data,
    };
    let document = bson::to_document(&case_study).map_err(StoreError::from)?;
    state.case_studies.insert_one(document).await?;

    Ok(ApiResponse::ok_with(
        "Scraped data saved successfully",
        case_study.researched_data,
    ))
}

/// GET /initializ/v1/ai/casestudy
pub async fn handle_list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Value>>, AppError> {
    let found = state.case_studies.find(Filter::all(), None).await?;
    Ok(ApiResponse::ok_with(
        "Successfully fetched the case studies",
        documents_to_json(found),
    ))
}

/// DELETE /initializ/v1/ai/casestudy/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid case study ID format.".to_string()))?;
    state.case_studies.delete_many(Filter::by_id(id)).await?;
    Ok(ApiResponse::ok("Case study deleted successfully"))
}
