//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Environment variable naming the YAML config file.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Prefix of per-key environment overrides (`__` separates nested keys).
pub const ENV_PREFIX: &str = "GH_ISSUES_LOCAL_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `logging.level` is not a known level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `server.port` is zero
    #[error("Invalid port: 0. Must be between 1 and 65535")]
    InvalidPort,

    /// `auth.token` is set but blank
    #[error("auth.token cannot be empty")]
    EmptyToken,

    /// `storage.root_path` is blank
    #[error("storage.root_path cannot be empty")]
    EmptyRootPath,
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file configured; defaults and environment only.
    Defaults,
    /// Merged from this YAML file.
    File(PathBuf),
    /// A file was configured but does not exist; defaults were used.
    MissingFile(PathBuf),
}

/// A validated configuration and its origin.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Merged settings
    pub config: Config,
    /// Origin of the file layer
    pub source: ConfigSource,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML file: `path`, else the file named by `CONFIG_FILE`
    /// 3. Environment variables (`GH_ISSUES_LOCAL_*`, `__` for nesting)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from));

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let source = match path {
            Some(path) if path.is_file() => {
                figment = figment.merge(Yaml::file(&path));
                ConfigSource::File(path)
            }
            Some(path) => ConfigSource::MissingFile(path),
            None => ConfigSource::Defaults,
        };

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| match &source {
                ConfigSource::File(path) => {
                    format!("Failed to load config from {}", path.display())
                }
                _ => "Failed to extract configuration from figment".to_string(),
            })?;

        Self::validate(&config)?;
        Ok(LoadedConfig { config, source })
    }

    /// Load configuration from a specific file, ignoring the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config
            .auth
            .token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            return Err(ConfigError::EmptyToken);
        }

        if config.storage.root_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRootPath);
        }

        Ok(())
    }
}
