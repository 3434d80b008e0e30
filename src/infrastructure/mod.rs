//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Auth token persistence

pub mod auth;
pub mod config;
pub mod logging;
