//! Chat data models
//!
//! Defines the chat message/request shapes accepted by the API and the
//! structural validation over untyped JSON payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker slot of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Parse a role string, returning `None` for anything outside the enum
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (user/assistant/system)
    pub role: Role,
    /// Message content, non-empty after trimming
    pub content: String,
}

/// Chat API request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation history in order
    pub messages: Vec<ChatMessage>,
}

/// Message value object consumed by the UI layer for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

/// Events delivered on the chat SSE stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamEvent {
    /// Incremental model output
    TextDelta { text: String },
    /// Terminal failure after the stream has been committed
    Error { error: crate::utils::classify::ErrorInfo },
}

/// Parse an untyped payload into a typed chat request.
///
/// Total: never panics, rejection is communicated via `None`. Unknown
/// extra fields on the request or a message are ignored.
pub fn parse_chat_request(raw: &Value) -> Option<ChatRequest> {
    let messages = raw.as_object()?.get("messages")?.as_array()?;
    if messages.is_empty() {
        return None;
    }

    let messages = messages
        .iter()
        .map(parse_message)
        .collect::<Option<Vec<_>>>()?;

    Some(ChatRequest { messages })
}

/// Predicate form of [`parse_chat_request`]
pub fn validate_chat_request(raw: &Value) -> bool {
    parse_chat_request(raw).is_some()
}

/// Parse a single message element
fn parse_message(raw: &Value) -> Option<ChatMessage> {
    let msg = raw.as_object()?;

    let role = Role::parse(msg.get("role")?.as_str()?)?;
    let content = msg.get("content")?.as_str()?;

    // Whitespace-only content counts as empty
    if content.trim().is_empty() {
        return None;
    }

    Some(ChatMessage {
        role,
        content: content.to_string(),
    })
}
