//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod health;

use crate::config::Settings;
use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
///
/// Read-only at request time; shared across all requests
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
}

/// Create application router
pub fn create_router(settings: Settings) -> Router {
    let app_state = Arc::new(AppState { settings });

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(
            crate::middleware::logging::request_logging,
        ));

    Router::new()
        .route("/api/chat", post(chat::handle_chat))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack)
}
