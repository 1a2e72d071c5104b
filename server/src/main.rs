//! # medicat Main Entry Point
//!
//! File: server/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `medicat` binary, the backend of a chat-style
//! medical assistant. It handles:
//! - loading a `.env` file so `OPENAI_API_KEY` can live next to the project
//! - command-line argument parsing using Clap
//! - setting up logging based on verbosity flags
//! - routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Run the chat API on the default port
//! medicat serve
//!
//! # Ask a single question with debug logging
//! medicat -vv ask "기침이 나고 목이 아파요"
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod chat; // Prompt, provider adapter, response queue
mod commands; // `serve` and `ask`
mod core; // Configuration, errors, templating

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "medicat",
    about = "🐱 medicat: chat backend for a catty medical assistant",
    long_about = "Serves a chat API that forwards utterances to an LLM with a fixed \
                  medical-assistant persona, and queues the replies for polling.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the key may already be in the environment.
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
