//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// OpenRouter API configuration
    pub openrouter: OpenRouterConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// OpenRouter API configuration
///
/// The credential stays optional at startup: its absence is a resolution-
/// time configuration error, reported per request by the provider adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API key
    pub api_key: Option<String>,
    /// Model identifier override
    pub model: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Streaming request timeout in seconds
    pub stream_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "3000")
                    .parse()
                    .context("Invalid port number")?,
            },
            openrouter: OpenRouterConfig {
                api_key: env::var("OPENROUTER_API_KEY").ok(),
                model: env::var("OPENROUTER_MODEL").ok(),
                base_url: get_env_or_default("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                stream_timeout: get_env_or_default("STREAM_TIMEOUT", "300")
                    .parse()
                    .context("Invalid stream timeout value")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.openrouter.base_url.starts_with("http") {
            anyhow::bail!("Invalid OpenRouter base URL format, should start with 'http'");
        }

        if self.openrouter.timeout == 0 || self.openrouter.stream_timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
