//! # medicat Chat Server
//!
//! File: server/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `medicat serve` runs the chat API:
//! - `GET /` serves the chat page
//! - `POST /chatbot/` answers an utterance (and queues the answer)
//! - `GET /response/` pops the oldest queued answer
//!
//! ## Architecture
//!
//! - `config.rs`: flag/file/default merging
//! - `handlers.rs`: route handlers and shared state
//! - `server_logic.rs`: router assembly, binding and shutdown
//!
//! ## Examples
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! medicat serve --host 0.0.0.0 --port 8000 --templates ./templates
//! ```
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

pub mod config;
pub mod handlers;
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Reads the API key and config files, merges them with `args`, then runs
/// the server until shutdown. A missing key or template stops here, before
/// any port is bound.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let api_key = core_config::read_api_key()?;
    let file_config = core_config::load_config()?;
    let serve_config = config::resolve_config(args, file_config, api_key)?;
    info!("Effective server config: {:?}", serve_config);

    server_logic::run_server(serve_config).await
}
