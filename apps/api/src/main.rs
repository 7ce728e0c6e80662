mod case_studies;
mod config;
mod db;
mod errors;
mod generation;
mod ingest;
mod llm_client;
mod models;
mod pain_points;
mod prompt_library;
mod repository;
mod response;
mod routes;
mod scrape_client;
mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::{header, HeaderName, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scrape_client::ScrapeClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize MongoDB
    let database = db::connect(&config.mongo_uri, &config.mongo_database).await?;

    // Initialize upstream clients
    let llm = LlmClient::new(config.model_uri.clone(), config.model_token.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    if config.model_token.is_none() {
        warn!("TOKEN is not set; completion requests will fail until it is");
    }
    let scraper = ScrapeClient::new(&config.scraper_uri)?;

    // Build app state
    let state = AppState {
        users: db::repository(&database, db::USER_DATA),
        prompts: db::repository(&database, db::PROMPTS),
        pain_points: db::repository(&database, db::PAIN_POINTS),
        case_studies: db::repository(&database, db::CASE_STUDIES),
        llm: Arc::new(llm),
        scraper: Arc::new(scraper),
        sender: config.sender.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::ORIGIN,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::USER_AGENT,
            HeaderName::from_static("app-user"),
            HeaderName::from_static("org_id"),
        ])
        .max_age(Duration::from_secs(10 * 60))
}
