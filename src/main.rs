//! OpenRouter Chat API Server
//!
//! HTTP service backing a web chat UI: validates inbound message
//! histories and streams OpenRouter completions back to the caller

use anyhow::{Context, Result};
use tracing::info;

mod config;
mod handlers;
mod middleware;
mod models;
mod providers;
mod utils;

use config::Settings;
use handlers::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded");

    if settings.openrouter.api_key.is_none() {
        info!("OPENROUTER_API_KEY is not set; chat requests will fail until it is configured");
    }

    let app = create_router(settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Chat API server started on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Chat endpoint: http://{}/api/chat", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
