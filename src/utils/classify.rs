//! Upstream failure classification
//!
//! Maps a raw failure (upstream HTTP status plus message) into the
//! presentation-oriented descriptor the UI renders next to its retry
//! affordance. Distinct from the wire-level error envelope.

use serde::{Deserialize, Serialize};

/// User-facing error descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub title: String,
    pub message: String,
    pub action_text: String,
}

impl ErrorInfo {
    fn new(title: &str, message: &str, action_text: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            action_text: action_text.to_string(),
        }
    }
}

/// Classify a failure by upstream status code.
///
/// Total: every input, including no status and an empty message, yields a
/// populated descriptor. Unmatched statuses fall through to the default
/// branch, which surfaces the original message text.
pub fn classify_failure(status: Option<u16>, message: &str) -> ErrorInfo {
    match status {
        Some(401) => ErrorInfo::new(
            "Authentication error",
            "The API key is invalid or not set. Check your environment configuration.",
            "Check configuration",
        ),
        Some(429) => ErrorInfo::new(
            "Rate limit",
            "Too many requests. Wait a moment and try again.",
            "Retry later",
        ),
        Some(400) => ErrorInfo::new(
            "Input error",
            "There is a problem with the input. Check your message.",
            "Fix and retry",
        ),
        Some(500) => ErrorInfo::new(
            "Server error",
            "A problem occurred on the server. Wait a moment and try again.",
            "Retry",
        ),
        Some(502) => ErrorInfo::new(
            "Connection error",
            "Failed to connect to the AI service. Wait a moment and try again.",
            "Retry",
        ),
        Some(504) => ErrorInfo::new(
            "Timeout",
            "The request timed out. Please try again.",
            "Retry",
        ),
        _ => {
            let message = if message.is_empty() {
                "An unknown error occurred"
            } else {
                message
            };
            ErrorInfo::new("Error", message, "Retry")
        }
    }
}
