//! Implementation of the `gh-issues-local token` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::auth::ensure_token;
use crate::infrastructure::config::ConfigLoader;

/// `token` takes no flags.
#[derive(Args, Debug, Default)]
pub struct TokenArgs {}

/// Result of `token`.
#[derive(Debug, Serialize)]
pub struct TokenOutput {
    /// The bearer token
    pub token: String,
    /// Token file, or `None` when the token comes from configuration.
    pub path: Option<PathBuf>,
}

impl CommandOutput for TokenOutput {
    fn to_human(&self) -> String {
        self.token.clone()
    }
}

/// The token the server would accept: the configured one, else the token file.
pub fn resolve_token(config: &Config) -> Result<TokenOutput> {
    if let Some(token) = &config.auth.token {
        return Ok(TokenOutput {
            token: token.clone(),
            path: None,
        });
    }
    let path = config.token_file();
    Ok(TokenOutput {
        token: ensure_token(&path)?,
        path: Some(path),
    })
}

/// Print the token.
pub fn execute(_args: TokenArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let loaded = ConfigLoader::load(config_path)?;
    let result = resolve_token(&loaded.config)?;
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_configured_token_wins() {
        let mut config = Config::default();
        config.auth.token = Some("fixed".to_string());
        let result = resolve_token(&config).unwrap();
        assert_eq!(result.token, "fixed");
        assert!(result.path.is_none());
    }

    #[test]
    fn test_token_file_is_created_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let result = resolve_token(&config).unwrap();
        assert_eq!(result.path, Some(dir.path().join(".gh-issues-local-token")));
        assert_eq!(resolve_token(&config).unwrap().token, result.token);

        let json = result.to_json();
        assert_eq!(json["token"], result.token);
    }
}
