//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Request logging middleware
///
/// Records timing and outcome for each HTTP request
pub async fn request_logging(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        info!("Request started: {} {}", method, uri.path());

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();

        if status.is_success() {
            info!(
                "Request completed: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        } else if status.is_client_error() {
            warn!(
                "Client error: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        } else {
            warn!(
                "Server error: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        }

        if duration.as_secs() > 5 {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri.path(),
                duration.as_secs_f64()
            );
        }

        response
    }
    .instrument(span)
    .await
}
