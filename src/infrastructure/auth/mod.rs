//! Bearer token persistence and the auth-required decision.

pub mod token;

pub use token::{auth_required, ensure_token, generate_token};
