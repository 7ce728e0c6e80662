pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{case_studies, generation, ingest, pain_points, prompt_library};

const API_PREFIX: &str = "/initializ/v1/ai";

fn api_routes() -> Router<AppState> {
    Router::new()
        // Generation
        .route("/generatewithAI", post(generation::handlers::handle_generate))
        // Case studies
        .route(
            "/casestudy",
            get(case_studies::handlers::handle_list).post(case_studies::handlers::handle_create),
        )
        .route("/casestudy/:id", delete(case_studies::handlers::handle_delete))
        // Pain points
        .route(
            "/painpoints",
            get(pain_points::handlers::handle_list).post(pain_points::handlers::handle_create),
        )
        .route("/painpoints/:id", delete(pain_points::handlers::handle_delete))
        // Prompt library
        .route("/prompts", get(prompt_library::handlers::handle_list))
        .route("/prompt/:promptId", get(prompt_library::handlers::handle_get))
        .route("/saveprompt", post(prompt_library::handlers::handle_save))
        .route(
            "/updateprompt/:promptId",
            put(prompt_library::handlers::handle_update),
        )
        // Ingestion
        .route("/upload", post(ingest::handlers::handle_upload))
        .route("/allusers", get(ingest::handlers::handle_all_users))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest(API_PREFIX, api_routes())
        .with_state(state)
}
