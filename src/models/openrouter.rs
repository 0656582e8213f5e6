//! OpenRouter wire-level data models
//!
//! OpenRouter exposes an OpenAI-compatible chat completion API; these are
//! the request and streaming response structures the provider adapter
//! exchanges with it

use crate::models::chat::ChatMessage;
use serde::{Deserialize, Serialize};

/// Chat completion request sent upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier, e.g. "anthropic/claude-3.7-sonnet:thinking"
    pub model: String,
    /// Conversation history in order
    pub messages: Vec<ChatMessage>,
    /// Always true for this service
    pub stream: bool,
}

/// One SSE chunk of a streaming completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// Choice element of a streaming chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub index: u32,
    pub delta: StreamDelta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Incremental message delta
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StreamChunk {
    /// Extract the text delta from the first choice, if any
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Error body returned by the upstream API on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamErrorResponse {
    pub error: UpstreamErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}
