//! Utilities module
//!
//! Error handling, failure classification and logging helpers

pub mod classify;
pub mod error;
pub mod logging;
