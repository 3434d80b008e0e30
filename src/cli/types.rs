//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::serve::ServeArgs;
use super::commands::token::TokenArgs;

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "gh-issues-local")]
#[command(about = "Local, file-backed GitHub Issues REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// YAML config file (overrides CONFIG_FILE)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the issues API server
    Serve(ServeArgs),

    /// Print the bearer token, creating it if needed
    Token(TokenArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from([
            "gh-issues-local",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--no-auth",
            "--config",
            "issues.yaml",
        ]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(9000));
        assert!(args.no_auth);
        assert_eq!(cli.config, Some(PathBuf::from("issues.yaml")));
    }

    #[test]
    fn test_token_json_flag() {
        let cli = Cli::parse_from(["gh-issues-local", "token", "--json"]);
        assert!(matches!(cli.command, Commands::Token(_)));
        assert!(cli.json);
    }
}
