//! # medicat Ask Command
//!
//! File: server/src/commands/ask.rs
//!
//! `medicat ask <UTTERANCE>` runs one utterance through the same prompt and
//! provider path as `POST /chatbot/` and prints the bot message to stdout.
//! Nothing is queued. Handy for checking a key or model without a browser.
//!
use crate::chat::{self, llm::OpenAiClient};
use crate::commands::serve::config::resolve_provider;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The utterance to send, e.g. "머리가 아프고 열이 나요".
    pub utterance: String,

    /// Chat-completion model identifier.
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let api_key = config::read_api_key()?;
    let file_config = config::load_config()?;
    let provider_config = resolve_provider(args.model, args.base_url, &file_config, api_key)?;
    info!("Asking {:?}", provider_config);

    let client = OpenAiClient::new(provider_config);
    let message = chat::answer_utterance(&client, &args.utterance)
        .await
        .unwrap_or_else(|| chat::NO_INPUT.to_string());
    println!("{}", message);
    Ok(())
}
