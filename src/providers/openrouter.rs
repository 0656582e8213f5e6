//! OpenRouter provider implementation
//!
//! Resolves credentials into a per-request model handle and streams chat
//! completions over the OpenAI-compatible SSE protocol

use super::{BoxStream, ChatProvider, ProviderError};
use crate::config::OpenRouterConfig;
use crate::models::chat::ChatMessage;
use crate::models::openrouter::{CompletionRequest, StreamChunk, UpstreamErrorResponse};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Model used when neither an explicit name nor an override is given
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.7-sonnet:thinking";

/// OpenRouter provider handle
///
/// Holds a resolved credential and the HTTP clients. Creating one performs
/// no network I/O.
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    stream_client: Client,
    api_key: String,
    base_url: String,
    model_override: Option<String>,
}

impl OpenRouterProvider {
    /// Resolve the provider from configuration.
    ///
    /// Fails when the credential is absent or blank after trimming; the
    /// server, not the caller, is misconfigured in that case.
    pub fn resolve(config: &OpenRouterConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ProviderError::Config(
                    "OPENROUTER_API_KEY environment variable is not set".to_string(),
                )
            })?;

        let stream_client = Client::builder()
            .timeout(Duration::from_secs(config.stream_timeout))
            .user_agent(concat!("openrouter-chat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            stream_client,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_override: config.model.clone(),
        })
    }

    /// Select a model and produce a single-use handle for it.
    ///
    /// Selection order: explicit argument, configured override, fixed
    /// default.
    pub fn model(&self, name: Option<&str>) -> ModelHandle {
        let model = name
            .map(str::to_string)
            .or_else(|| self.model_override.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        ModelHandle {
            model,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            client: self.stream_client.clone(),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn stream_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, String>, ProviderError> {
        self.model(Some(model)).stream_text(messages).await
    }
}

/// Single-use handle for one streaming completion
#[derive(Debug, Clone)]
pub struct ModelHandle {
    model: String,
    api_key: String,
    base_url: String,
    client: Client,
}

impl ModelHandle {
    /// Model identifier this handle generates with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a streaming completion for the message history.
    ///
    /// The upstream HTTP call happens here; the returned stream yields
    /// text deltas in arrival order.
    pub async fn stream_text(
        &self,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, String>, ProviderError> {
        debug!("Sending OpenRouter streaming completion request for model: {}", self.model);

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: true,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<UpstreamErrorResponse>(&error_text) {
                Ok(parsed) => parsed.error.message,
                Err(_) => error_text,
            };
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk_result| {
                let deltas = match chunk_result {
                    Ok(chunk) => parse_sse_chunk(&chunk),
                    Err(e) => vec![Err(ProviderError::Stream(e.to_string()))],
                };
                futures::stream::iter(deltas)
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}

/// Parse the data lines of an SSE chunk into text deltas.
///
/// The `[DONE]` marker and chunks without content (role prelude, finish
/// chunks, comment lines) produce nothing.
fn parse_sse_chunk(chunk: &[u8]) -> Vec<Result<String, ProviderError>> {
    let chunk_str = match std::str::from_utf8(chunk) {
        Ok(s) => s,
        Err(e) => return vec![Err(ProviderError::Stream(format!("invalid UTF-8 data: {}", e)))],
    };

    let mut deltas = Vec::new();
    for line in chunk_str.lines() {
        if let Some(data) = line.strip_prefix("data: ") {
            if data.trim() == "[DONE]" {
                debug!("Received streaming response end marker");
                break;
            }

            match serde_json::from_str::<StreamChunk>(data) {
                Ok(parsed) => {
                    if let Some(text) = parsed.delta_text() {
                        deltas.push(Ok(text.to_string()));
                    }
                }
                Err(e) => {
                    warn!("Failed to parse streaming response chunk: {} - data: {}", e, data);
                }
            }
        }
    }

    deltas
}
