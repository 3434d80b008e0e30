//! Domain models: GitHub-shaped records, query parameters and configuration.

pub mod comment;
pub mod config;
pub mod issue;
pub mod label;
pub mod patch;
pub mod query;
pub mod timestamp;
pub mod user;

pub use comment::{Comment, CommentRecord};
pub use config::{
    AuthConfig, Config, LogFormat, LoggingConfig, RotationPolicy, ServerConfig, StorageConfig,
    StorageProvider,
};
pub use issue::{Issue, IssueChanges, IssueState, NewIssue, TitleValue};
pub use label::Label;
pub use query::{
    CommentListQuery, CommentSort, IssueListQuery, IssueSort, Page, SearchItem, SearchQuery,
    SearchResults, SortDirection, StateFilter,
};
pub use user::SimpleUser;
