use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::{self, oid::ObjectId, DateTime};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::prompt::{SavePromptRequest, UpdatePromptRequest};
use crate::models::{document_to_json, documents_to_json};
use crate::repository::{Field, Filter, Sort, StoreError, Update};
use crate::response::ApiResponse;
use crate::state::AppState;

fn parse_prompt_id(raw: &str) -> Result<ObjectId, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::Validation("Prompt Id is required.".to_string()));
    }
    ObjectId::parse_str(raw).map_err(|_| AppError::Validation("Invalid prompt ID format.".to_string()))
}

/// GET /initializ/v1/ai/prompts
pub async fn handle_list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Value>>, AppError> {
    let found = state
        .prompts
        .find(Filter::all(), Some(Sort::descending(Field::CreatedAt)))
        .await?;
    Ok(ApiResponse::ok_with(
        "Successfully fetched the prompts",
        documents_to_json(found),
    ))
}

/// GET /initializ/v1/ai/prompt/:promptId
pub async fn handle_get(
    State(state): State<AppState>,
    Path(prompt_id): Path<String>,
) -> Result<ApiResponse<Value>, AppError> {
    let id = parse_prompt_id(&prompt_id)?;
    let found = state
        .prompts
        .find_one(Filter::by_id(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Prompt {prompt_id} not found")))?;
    Ok(ApiResponse::ok_with(
        "Successfully fetched the prompt by id",
        document_to_json(found),
    ))
}

/// POST /initializ/v1/ai/saveprompt
pub async fn handle_save(
    State(state): State<AppState>,
    payload: Result<Json<SavePromptRequest>, JsonRejection>,
) -> Result<ApiResponse, AppError> {
    let Json(request) = payload?;
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let prompt = request.into_prompt(Utc::now());
    let document = bson::to_document(&prompt).map_err(StoreError::from)?;
    state.prompts.insert_one(document).await?;
    info!("Saved prompt '{}'", prompt.name);

    Ok(ApiResponse::ok("Successfully saved the prompt."))
}

/// PUT /initializ/v1/ai/updateprompt/:promptId
///
/// Overwrites `prompt`, `prompt_rule` and `updated_by` and stamps
/// `updated_at`. Never inserts.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(prompt_id): Path<String>,
    payload: Result<Json<UpdatePromptRequest>, JsonRejection>,
) -> Result<ApiResponse, AppError> {
    let id = parse_prompt_id(&prompt_id)?;
    let Json(request) = payload?;

    let update = Update::new()
        .set(Field::UpdatedAt, DateTime::now())
        .set(Field::UpdatedBy, request.updated_by)
        .set(Field::Prompt, request.prompt)
        .set(Field::PromptRule, request.prompt_rule);

    let outcome = state.prompts.update_one(Filter::by_id(id), update, false).await?;
    if outcome.matched == 0 {
        return Err(AppError::NotFound(format!("Prompt {prompt_id} not found")));
    }
    debug!("Updated prompt {prompt_id} (modified: {})", outcome.modified);

    Ok(ApiResponse::ok("Successfully updated the prompt."))
}
