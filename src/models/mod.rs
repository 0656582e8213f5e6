//! Data models module
//!
//! Defines the chat API shapes and the OpenRouter wire structures

pub mod chat;
pub mod openrouter;
