use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::{self, oid::ObjectId};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::{document_to_json, documents_to_json};
use crate::models::pain_point::{PainPoint, PainPointRequest};
use crate::pain_points::generate;
use crate::repository::{Field, Filter, Sort, StoreError};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /initializ/v1/ai/painpoints
pub async fn handle_list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Value>>, AppError> {
    let found = state
        .pain_points
        .find(Filter::all(), Some(Sort::descending(Field::CreatedAt)))
        .await?;
    Ok(ApiResponse::ok_with(
        "Successfully fetched the pain points",
        documents_to_json(found),
    ))
}

/// POST /initializ/v1/ai/painpoints
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<PainPointRequest>, JsonRejection>,
) -> Result<ApiResponse<Value>, AppError> {
    let Json(request) = payload?;
    let role = request.role.trim();
    if role.is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }

    let (pain_points, value_proposition) = generate(state.llm.as_ref(), role)
        .await
        .map_err(|e| AppError::Llm(format!("Error generating pain points: {e}")))?;

    let pain_point = PainPoint {
        role: role.to_string(),
        pain_points,
        value_proposition,
        created_at: Utc::now(),
    };
    let document = bson::to_document(&pain_point).map_err(StoreError::from)?;
    state.pain_points.insert_one(document.clone()).await?;
    info!("Saved pain points for role '{role}'");

    Ok(ApiResponse::ok_with(
        "Successfully saved the AI response as a pain point",
        document_to_json(document),
    ))
}

/// DELETE /initializ/v1/ai/painpoints/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid Pain Points ID format.".to_string()))?;
    state.pain_points.delete_many(Filter::by_id(id)).await?;
    Ok(ApiResponse::ok("Pain Points deleted successfully"))
}
