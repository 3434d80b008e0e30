//! Subcommand implementations.

pub mod serve;
pub mod token;
