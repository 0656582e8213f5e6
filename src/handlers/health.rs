//! Health check handlers
//!
//! Provides application health status check endpoints

use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
    })
}

/// Liveness check
///
/// GET /health/live
/// Confirms the service is running without touching external dependencies
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(HealthResponse {
        status: "alive".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
    })
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static START_TIME: OnceLock<u64> = OnceLock::new();

    let start_time = *START_TIME.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    let current_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    current_time.saturating_sub(start_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.0;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "openrouter-chat");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let response = liveness_check().await.0;
        assert_eq!(response.status, "alive");
    }

    #[test]
    fn test_uptime_is_monotonic() {
        let uptime1 = get_uptime_seconds();
        let uptime2 = get_uptime_seconds();
        assert!(uptime2 >= uptime1);
    }
}
