//! Configuration management module
//!
//! Loads application configuration from the process environment

pub mod settings;

pub use settings::{LoggingConfig, OpenRouterConfig, ServerConfig, Settings};
