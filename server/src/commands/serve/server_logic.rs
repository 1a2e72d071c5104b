//! # medicat HTTP Server Implementation
//!
//! File: server/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! Wires the chat pipeline into an Axum server:
//! 1. Render the chat page once from the templates directory
//! 2. Build the completion client and an empty response queue
//! 3. Assemble the router with tracing and CORS middleware
//! 4. Bind, serve, and shut down gracefully on Ctrl+C / SIGTERM
//!
//! Steps 1 and 4 are where startup can fail; once the listener is bound,
//! requests never produce a server error from this layer.
//!
use super::config::ServeConfig;
use super::handlers::{self, AppState};
use crate::chat::llm::OpenAiClient;
use crate::chat::queue::ResponseQueue;
use crate::core::error::Result;
use crate::core::templating::{PageContext, PageRenderer};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

/// # Run HTTP Server (`run_server`)
///
/// Starts the chat API and blocks until a shutdown signal arrives.
///
/// ## Errors
///
/// Returns an error if:
/// - the templates directory lacks a valid `index.html`
/// - the listener cannot be bound
/// - the Axum server fails while running
pub async fn run_server(config: ServeConfig) -> Result<()> {
    let pages = PageRenderer::load(&config.templates_dir)?;
    let index_html = pages.render_index(&PageContext::default())?;

    let client = OpenAiClient::new(config.provider.clone());
    let model = client.model().to_string();
    let state = AppState {
        provider: Arc::new(client),
        queue: ResponseQueue::new(),
        index_html: Arc::from(index_html),
    };
    let app = create_app(state, config.enable_cors);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;
    let bound = listener
        .local_addr()
        .context("Failed to read bound address")?;

    println!("\n=================================================================");
    println!("🐱 medicat listening on: http://{}", bound);
    println!("📄 Templates:            {}", config.templates_dir.display());
    println!("🤖 Model:                {}", model);
    println!("🔗 Provider:             {}", config.provider.base_url);
    println!("🔒 CORS enabled:         {}", config.enable_cors);
    println!("=================================================================\n");
    info!("Starting server on {}", bound);

    serve_until(listener, app, shutdown_signal()).await?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Serves `app` on `listener` until `shutdown` resolves, then lets
/// in-flight requests finish.
async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router for the three chat routes. Each JSON route also
/// answers without its trailing slash. CORS, when enabled, allows every
/// origin, method and header.
pub fn create_app(state: AppState, enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(handlers::index))
        .route("/chatbot/", post(handlers::chatbot))
        .route("/chatbot", post(handlers::chatbot))
        .route("/response/", get(handlers::response))
        .route("/response", get(handlers::response))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

// --- Unit Tests ---
