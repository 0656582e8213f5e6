//! OpenRouter Chat API Library
//!
//! Validates chat message histories and streams OpenRouter completions

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::chat::{
    parse_chat_request, validate_chat_request, ChatMessage, ChatRequest, ChatStreamEvent, Role,
    UiMessage,
};
pub use providers::{ChatProvider, ModelHandle, OpenRouterProvider, ProviderError, DEFAULT_MODEL};
pub use utils::classify::{classify_failure, ErrorInfo};
pub use utils::error::{
    error_envelope, is_error_envelope, AppError, AppResult, ErrorEnvelope, ErrorKind,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
