//! Runtime configuration, loaded by `infrastructure::config`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for gh-issues-local
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directory holding the token file and, by default, the storage root
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage backend configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bearer-token auth configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Built frontend to serve at `/` (skipped when the directory is missing)
    #[serde(default)]
    pub frontend_dir: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            frontend_dir: None,
        }
    }
}

impl Config {
    /// Absolute storage root: `storage.root_path` resolved against `data_dir`.
    pub fn storage_root(&self) -> PathBuf {
        self.data_dir.join(&self.storage.root_path)
    }

    /// Path of the persisted auth token.
    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join(".gh-issues-local-token")
    }
}

/// Which storage backend holds issue data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// JSON files on the local filesystem
    #[default]
    Local,
    /// Process memory; everything is lost on exit
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Backend to use
    #[serde(default)]
    pub provider: StorageProvider,

    /// Root directory for the local provider, relative to `data_dir` unless absolute
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,
}

fn default_root_path() -> PathBuf {
    PathBuf::from("storage")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            root_path: default_root_path(),
        }
    }
}

/// Auth configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthConfig {
    /// Fixed bearer token; when unset a token file in `data_dir` is used
    #[serde(default)]
    pub token: Option<String>,

    /// Force auth on or off; when unset it is required for non-loopback binds
    #[serde(default)]
    pub required: Option<bool>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL used in issue links; derived from `Host` when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            enable_cors: default_true(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable text
    Pretty,
}

/// Rotation policy for the optional log file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// A single file
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// How often the log file rolls over
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_root_resolves_against_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/srv/issues"),
            ..Config::default()
        };
        assert_eq!(config.storage_root(), PathBuf::from("/srv/issues/storage"));
        assert_eq!(
            config.token_file(),
            PathBuf::from("/srv/issues/.gh-issues-local-token")
        );
    }

    #[test]
    fn test_absolute_root_path_wins() {
        let mut config = Config {
            data_dir: PathBuf::from("/srv/issues"),
            ..Config::default()
        };
        config.storage.root_path = PathBuf::from("/data/storage");
        assert_eq!(config.storage_root(), PathBuf::from("/data/storage"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "
storage:
  provider: memory
auth:
  token: secret123
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.storage.provider, StorageProvider::Memory);
        assert_eq!(config.storage.root_path, PathBuf::from("storage"));
        assert_eq!(config.auth.token.as_deref(), Some("secret123"));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
