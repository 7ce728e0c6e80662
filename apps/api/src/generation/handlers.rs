//! Axum route handler for the generate-with-AI endpoint.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::RESEARCH_TOKEN;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub system_prompt: String,
    pub task: String,
    pub linkedin_url: String,
    pub stream: bool,
    pub to_do_research: bool,
}

/// POST /initializ/v1/ai/generatewithAI
///
/// Unknown body fields (clients still send `company_url`) are ignored.
///
/// With `stream` the upstream body is relayed unchanged as
/// `text/event-stream`; otherwise the first choice's text is returned in the
/// envelope.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;

    let mut task = request.task;
    if request.to_do_research {
        let research = state
            .scraper
            .enrich(&request.linkedin_url)
            .await
            .map_err(|e| AppError::Upstream(format!("Error occurred while scraping the URL: {e}")))?;
        task = task.replace(RESEARCH_TOKEN, &research);
    }

    if request.stream {
        let stream = state.llm.stream(&request.system_prompt, &task).await?;
        return Ok((
            [(header::CONTENT_TYPE, "text/event-stream")],
            Body::from_stream(stream),
        )
            .into_response());
    }

    let text = state.llm.complete(&request.system_prompt, &task).await?;
    Ok(ApiResponse::ok_with("Successfully generated the response", text).into_response())
}
