use anyhow::{Context, Result};

use crate::ingest::placeholders::SenderIdentity;

/// Application configuration loaded from environment variables.
///
/// `TOKEN` is optional: a missing completion credential fails the
/// individual request that needs it, not the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub scraper_uri: String,
    pub model_uri: String,
    pub model_token: Option<String>,
    pub sender: SenderIdentity,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = SenderIdentity::default();

        Ok(Config {
            mongo_uri: require_env("MONGOURI")?,
            mongo_database: optional_env("MONGO_DATABASE").unwrap_or_else(|| "AIAGENT".to_string()),
            scraper_uri: require_env("SCRAPPERURI")?,
            model_uri: require_env("MODELURI")?,
            model_token: optional_env("TOKEN"),
            sender: SenderIdentity {
                company: optional_env("SENDER_COMPANY").unwrap_or(defaults.company),
                first_name: optional_env("SENDER_FIRST_NAME").unwrap_or(defaults.first_name),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
