//! gh-issues-local - a local, file-backed GitHub Issues REST API
//!
//! Serves GitHub's issue and comment endpoints from JSON documents kept in
//! a pluggable blob store, behind an optional bearer-token gate.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the storage port
//! - **Service Layer** (`services`): the issue/comment store
//! - **Adapters** (`adapters`): axum HTTP surface and storage backends
//! - **Infrastructure Layer** (`infrastructure`): config, logging, auth token
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gh_issues_local::adapters::storage::InMemoryStorage;
//! use gh_issues_local::domain::models::NewIssue;
//! use gh_issues_local::IssueStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = IssueStore::new(Arc::new(InMemoryStorage::new()));
//! let issue = store
//!     .create("octo", "hello", NewIssue::new("First issue"), "http://localhost:8000")
//!     .await?;
//! assert_eq!(issue.number, 1);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::http::{build_router, AppState, AuthSettings, RouterOptions};
pub use domain::models::{Comment, Config, Issue, IssueChanges, IssueState, NewIssue};
pub use domain::ports::BlobStorage;
pub use domain::{StorageError, StoreError, StoreResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::IssueStore;
