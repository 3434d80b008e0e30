//! GitHub Issues REST surface over axum.

pub mod auth;
mod comments;
pub mod error;
pub mod extract;
mod issues;
mod meta;
pub mod params;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{build_router, HttpServer, RouterOptions};
pub use state::{AppState, AuthSettings};
