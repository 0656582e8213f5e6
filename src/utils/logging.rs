//! Logging utilities
//!
//! Shared logging helper functions

use crate::models::chat::ChatRequest;

/// Set to true to include full message content in debug logs
/// Default is false to keep conversations out of the logs
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} chars truncated)", &s[..end], s.len() - end)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a chat request for logging
/// Keeps the structure but truncates verbose content
pub fn create_chat_request_log_summary(request: &ChatRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        serde_json::to_value(request).unwrap_or(serde_json::json!({"error": "serialize failed"}))
    } else {
        let filtered_messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|msg| {
                // System prompts get truncated more aggressively
                let max_len = match msg.role {
                    crate::models::chat::Role::System => 100,
                    _ => 200,
                };
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": truncate_content(&msg.content, max_len),
                })
            })
            .collect();

        serde_json::json!({
            "message_count": request.messages.len(),
            "messages": filtered_messages,
        })
    }
}
