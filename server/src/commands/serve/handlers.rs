//! # medicat HTTP Handlers
//!
//! File: server/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! The three routes of the chat API and the state they share.
//!
//! | Route | Behavior |
//! |---|---|
//! | `GET /` | the chat page rendered at startup |
//! | `POST /chatbot/` | answer an utterance, queue the answer, return it |
//! | `GET /response/` | pop the oldest queued answer |
//!
//! Both JSON routes always answer 200 once the body has been accepted.
//! Provider failures surface only as the fallback text.
//!
//! The chat body is parsed as JSON whatever its `Content-Type`, so clients
//! that omit the header are still served.
//!
use crate::chat::{self, llm::CompletionProvider, queue::ResponseQueue};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub queue: ResponseQueue,
    pub index_html: Arc<str>,
}

/// Body of `POST /chatbot/`.
#[derive(Deserialize, Serialize, Debug)]
pub struct UserRequest {
    pub utterance: String,
}

/// Body of every JSON response.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct BotResponse {
    pub bot_message: String,
}

impl BotResponse {
    fn new(bot_message: impl Into<String>) -> Json<Self> {
        Json(Self {
            bot_message: bot_message.into(),
        })
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

/// `POST /chatbot/`
///
/// Blank utterances get [`chat::NO_INPUT`] and are not queued. Everything
/// else is answered, pushed onto the queue and also returned directly.
/// A body that is not `{"utterance": string}` is rejected before the
/// provider is called.
pub async fn chatbot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BotResponse>, JsonRejection> {
    let Json(request) = Json::<UserRequest>::from_bytes(&body)?;
    let reply = match chat::answer_utterance(state.provider.as_ref(), &request.utterance).await {
        Some(answer) => {
            state.queue.push(answer.clone());
            debug!("Response queue length: {}", state.queue.len());
            BotResponse::new(answer)
        }
        None => BotResponse::new(chat::NO_INPUT),
    };
    Ok(reply)
}

/// `GET /response/`
pub async fn response(State(state): State<AppState>) -> Json<BotResponse> {
    let message = state.queue.pop_oldest();
    if state.queue.is_empty() {
        debug!("Response queue drained");
    }
    BotResponse::new(message)
}
