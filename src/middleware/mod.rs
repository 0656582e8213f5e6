//! Middleware module
//!
//! HTTP middleware components

pub mod logging;
