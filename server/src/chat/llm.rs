//! # LLM Client Adapter
//!
//! File: server/src/chat/llm.rs
//!
//! ## Overview
//!
//! Wraps a single call to an OpenAI-compatible chat-completion endpoint.
//!
//! - `CompletionProvider`: the seam between the HTTP layer and the remote
//!   model. The server holds an `Arc<dyn CompletionProvider>`, so tests can
//!   swap in a stub.
//! - `OpenAiClient`: the reqwest-backed implementation.
//! - `ProviderError`: categorized failure of a call (transport, auth, rate
//!   limit, other upstream status, malformed body).
//! - `ask_model`: runs one completion and collapses every failure into
//!   [`FALLBACK_MESSAGE`], logging the category. Callers always get text.
//!
//! No retries are attempted and no timeout is set beyond reqwest's default.
//!
use super::prompt::ChatMessage;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

/// Returned to the client whenever the completion call fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, I am unable to process your request at the moment.";

/// Categorized failure of a completion call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication rejected ({status}): {body}")]
    Auth { status: u16, body: String },

    #[error("rate limited ({status}): {body}")]
    RateLimited { status: u16, body: String },

    #[error("provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Short label used as a structured logging field.
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::Transport(_) => "transport",
            ProviderError::Auth { .. } => "auth",
            ProviderError::RateLimited { .. } => "rate_limit",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }

    fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            status @ (401 | 403) => ProviderError::Auth { status, body },
            status @ 429 => ProviderError::RateLimited { status, body },
            status => ProviderError::Upstream { status, body },
        }
    }
}

/// Something that can turn a conversation into the assistant's reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ProviderError>;
}

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

// The API key must never end up in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Chat-completion client for api.openai.com and compatible servers.
pub struct OpenAiClient {
    config: ProviderConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ProviderError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: conversation,
        };
        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_status(status, text));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| ProviderError::MalformedResponse("first choice has no content".to_string()))
    }
}

/// Runs one completion. Any failure is logged and replaced with
/// [`FALLBACK_MESSAGE`].
pub async fn ask_model(provider: &dyn CompletionProvider, conversation: &[ChatMessage]) -> String {
    match provider.complete(conversation).await {
        Ok(message) => {
            debug!("Model response: {}", message);
            message
        }
        Err(e) => {
            error!(category = e.category(), "Error during completion call: {}", e);
            FALLBACK_MESSAGE.to_string()
        }
    }
}
