//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Serialized defaults
//! - YAML file named by `--config` or `CONFIG_FILE`
//! - `GH_ISSUES_LOCAL_*` environment overrides
//! - Validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ConfigSource, LoadedConfig};
