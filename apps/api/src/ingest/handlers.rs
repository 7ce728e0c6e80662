use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::ingest::pipeline::{IngestPipeline, IngestReport};
use crate::ingest::sheet::records_from_upload;
use crate::ingest::templates::PromptCatalog;
use crate::models::documents_to_json;
use crate::repository::{Field, Filter, Sort};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64-encoded xlsx workbook.
    #[serde(default)]
    pub file_data: String,
}

/// POST /initializ/v1/ai/upload
///
/// Waits for the whole pipeline before answering. The pipeline runs on its
/// own task, so a client that disconnects early does not stop the remaining
/// rows. Row failures are logged and counted in the report; only a bad
/// payload or an unreadable prompt library fails the request.
pub async fn handle_upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<ApiResponse<IngestReport>, AppError> {
    let Json(request) = payload?;
    let records =
        records_from_upload(&request.file_data).map_err(|e| AppError::Validation(e.to_string()))?;

    let catalog = PromptCatalog::load(state.prompts.as_ref()).await?;

    let report = IngestPipeline::from_state(&state)
        .spawn(records, catalog)
        .await
        .context("upload pipeline task failed")?;

    Ok(ApiResponse::ok_with(
        "Data uploaded and AI output generated successfully",
        report,
    ))
}

/// GET /initializ/v1/ai/allusers
pub async fn handle_all_users(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Value>>, AppError> {
    let users = state
        .users
        .find(Filter::all(), Some(Sort::descending(Field::ColdCallGeneratedAt)))
        .await?;
    Ok(ApiResponse::ok_with(
        "Successfully fetched the user data",
        documents_to_json(users),
    ))
}
