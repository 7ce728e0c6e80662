//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the model endpoint directly.
//! All completions go through the `Completer` trait implemented here.
//!
//! Model, temperature and token budget are fixed; callers only choose the
//! system rule and the user prompt.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for every completion.
pub const MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct";
const MAX_TOKENS: u32 = 5000;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("bearer token not found, set the TOKEN environment variable")]
    MissingToken,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no response content found")]
    EmptyChoices,
}

pub type CompletionStream = BoxStream<'static, Result<Bytes, LlmError>>;

/// Text generation seam. `AppState` carries an `Arc<dyn Completer>`.
#[async_trait]
pub trait Completer: Send + Sync {
    /// One non-streaming completion; returns the first choice's content.
    async fn complete(&self, system_rule: &str, user_prompt: &str) -> Result<String, LlmError>;

    /// Same request with `stream: true`; the upstream body is relayed as-is.
    async fn stream(&self, system_rule: &str, user_prompt: &str)
        -> Result<CompletionStream, LlmError>;
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn new(system_rule: &'a str, user_prompt: &'a str, stream: bool) -> Self {
        Self {
            model: MODEL,
            stream,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_rule,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// The `{choices:[{message:{content}}]}` shape. The scraping service answers
/// with the same shape, so `scrape_client` reuses it.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatCompletion {
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }

    /// An empty choice list, or an empty first choice, is an error.
    pub fn into_text(self) -> Result<String, LlmError> {
        self.first_content()
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyChoices)
    }
}

/// Bearer-authenticated client for the chat-completion endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl LlmClient {
    pub fn new(endpoint: String, token: Option<String>) -> Result<Self> {
        // No client-wide timeout: streaming responses may legitimately run long.
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    async fn send(
        &self,
        body: &ChatRequest<'_>,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, LlmError> {
        let token = self.token.as_deref().ok_or(LlmError::MissingToken)?;

        let mut request = self.client.post(&self.endpoint).bearer_auth(token).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, system_rule: &str, user_prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest::new(system_rule, user_prompt, false);
        let response = self.send(&body, Some(REQUEST_TIMEOUT)).await?;

        let raw = response.text().await?;
        let completion: ChatCompletion = serde_json::from_str(&raw)?;
        let text = completion.into_text()?;

        debug!("Completion succeeded: {} chars", text.len());
        Ok(text)
    }

    async fn stream(
        &self,
        system_rule: &str,
        user_prompt: &str,
    ) -> Result<CompletionStream, LlmError> {
        let body = ChatRequest::new(system_rule, user_prompt, true);
        let response = self.send(&body, None).await?;
        Ok(response.bytes_stream().map_err(LlmError::Http).boxed())
    }
}
