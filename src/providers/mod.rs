//! Provider module
//!
//! Defines the ChatProvider trait and the OpenRouter implementation

pub mod openrouter;

use crate::models::chat::ChatMessage;
use crate::utils::error::AppError;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// A boxed stream of streaming results
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T, ProviderError>> + Send + 'a>>;

/// Errors raised by a provider adapter
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Missing or unusable server-side configuration
    #[error("{0}")]
    Config(String),

    /// Failed to reach the upstream API
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream API answered with a non-success status
    #[error("Upstream API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Malformed streaming payload
    #[error("Stream decode error: {0}")]
    Stream(String),
}

impl ProviderError {
    /// Upstream HTTP status, when the failure carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Upstream { status, .. } => Some(*status),
            ProviderError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Config(message) => AppError::ProviderInit(message),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Chat completion provider boundary
///
/// Concrete upstream clients are swappable behind this trait; network I/O
/// happens only at generation time.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Stream a completion for the given message history
    async fn stream_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, String>, ProviderError>;
}

pub use openrouter::{ModelHandle, OpenRouterProvider, DEFAULT_MODEL};
