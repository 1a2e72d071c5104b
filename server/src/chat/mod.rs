//! # medicat Chat Pipeline
//!
//! File: server/src/chat/mod.rs
//!
//! ## Overview
//!
//! Everything between an utterance arriving and a bot message leaving:
//! - `prompt`: persona + utterance conversation
//! - `llm`: the completion provider seam and the fallback adapter
//! - `queue`: the shared FIFO of produced answers
//!
//! `answer_utterance` is the path shared by `POST /chatbot/` and
//! `medicat ask`.
//!
pub mod llm;
pub mod prompt;
pub mod queue;

use llm::CompletionProvider;
use tracing::debug;

/// Reply for an utterance that is empty after trimming.
pub const NO_INPUT: &str = "No input received";

/// Trims `utterance` and, if anything is left, asks the model.
///
/// Returns `None` for blank input without touching the provider. A failed
/// provider call still yields `Some(FALLBACK_MESSAGE)`.
pub async fn answer_utterance(
    provider: &dyn CompletionProvider,
    utterance: &str,
) -> Option<String> {
    let utterance = utterance.trim();
    debug!("Received utterance: {}", utterance);
    if utterance.is_empty() {
        return None;
    }
    let conversation = prompt::build_conversation(utterance);
    Some(llm::ask_model(provider, &conversation).await)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub providers shared by the unit tests.
    use super::llm::{CompletionProvider, ProviderError};
    use super::prompt::ChatMessage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers `"echo: <utterance>"` and records every conversation it saw.
    #[derive(Default)]
    pub struct EchoProvider {
        pub seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl EchoProvider {
        pub fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().push(conversation.to_vec());
            let last = conversation.last().map(|m| m.content.as_str()).unwrap_or("");
            Ok(format!("echo: {}", last))
        }
    }

    /// Always fails as if the provider rejected the credential.
    #[derive(Default)]
    pub struct FailingProvider {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _conversation: &[ChatMessage]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Auth {
                status: 401,
                body: "invalid api key".to_string(),
            })
        }
    }
}
