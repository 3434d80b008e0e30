//! Issue domain model.
//!
//! Issues are stored and returned in the exact shape of GitHub's REST API,
//! so field order and nullability here are part of the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::label::Label;
use super::patch::present;
use super::timestamp::{iso_seconds, iso_seconds_option};
use super::user::SimpleUser;

/// State of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Accepting work
    #[default]
    Open,
    /// Resolved or dismissed
    Closed,
}

impl IssueState {
    /// Wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// `state_reason` set when an issue is closed without an explicit reason.
pub const REASON_COMPLETED: &str = "completed";
/// `state_reason` set when a closed issue is reopened without an explicit reason.
pub const REASON_REOPENED: &str = "reopened";

/// A GitHub-shaped issue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric id, unique across repositories
    pub id: u64,
    /// GraphQL-style node id
    pub node_id: String,
    /// Per-repository issue number, starting at 1
    pub number: u64,
    /// API URL of this issue
    pub url: String,
    /// API URL of the owning repository
    pub repository_url: String,
    /// URI template for the label sub-resource
    pub labels_url: String,
    /// API URL of the comment list
    pub comments_url: String,
    /// API URL of the event list
    pub events_url: String,
    /// Browser URL; same as `url` for the local server
    pub html_url: String,
    /// Open or closed
    pub state: IssueState,
    /// Why the issue was last closed or reopened
    pub state_reason: Option<String>,
    /// Issue title
    pub title: String,
    /// Markdown body, if any
    pub body: Option<String>,
    /// Author
    pub user: SimpleUser,
    /// Attached labels, in the order they were set
    pub labels: Vec<Label>,
    /// First assignee
    pub assignee: Option<SimpleUser>,
    /// All assignees
    pub assignees: Vec<SimpleUser>,
    /// Always null
    pub milestone: Option<serde_json::Value>,
    /// Always false
    pub locked: bool,
    /// Always null
    pub active_lock_reason: Option<String>,
    /// Number of comments on the issue
    pub comments: u64,
    /// Creation time, whole seconds
    #[serde(with = "iso_seconds")]
    pub created_at: DateTime<Utc>,
    /// Last modification time, whole seconds
    #[serde(with = "iso_seconds")]
    pub updated_at: DateTime<Utc>,
    /// When the issue was closed; null while open
    #[serde(with = "iso_seconds_option")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Who closed the issue; null while open
    pub closed_by: Option<SimpleUser>,
    /// Author relationship to the repository
    pub author_association: String,
}

impl Issue {
    /// Whether the issue carries a label with this name.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// An issue title as sent by clients: GitHub accepts strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleValue {
    /// A JSON string
    Text(String),
    /// A JSON integer, stored as its decimal text
    Number(i64),
}

impl fmt::Display for TitleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TitleValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Input for creating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Markdown body
    pub body: Option<String>,
    /// Label names
    pub labels: Option<Vec<String>>,
    /// Single assignee login, used when `assignees` is empty
    pub assignee: Option<String>,
    /// Assignee logins
    pub assignees: Option<Vec<String>>,
}

impl NewIssue {
    /// An issue with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the label names.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set the assignee logins.
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }
}

/// A PATCH change-set for an issue.
///
/// Each field is `None` when the key was not sent, `Some(None)` when it was
/// sent as `null`, and `Some(Some(v))` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueChanges {
    /// New title; `null` is ignored
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<TitleValue>>,
    /// New body; `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Option<String>>,
    /// Target state
    #[serde(default, deserialize_with = "present")]
    pub state: Option<Option<IssueState>>,
    /// Explicit state reason
    #[serde(default, deserialize_with = "present")]
    pub state_reason: Option<Option<String>>,
    /// Replacement label names; `null` clears them
    #[serde(default, deserialize_with = "present")]
    pub labels: Option<Option<Vec<String>>>,
    /// Replacement single assignee
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Option<String>>,
    /// Replacement assignee list; takes precedence over `assignee`
    #[serde(default, deserialize_with = "present")]
    pub assignees: Option<Option<Vec<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_state_defaults_to_open() {
        assert_eq!(IssueState::default(), IssueState::Open);
        assert_eq!(IssueState::default().as_str(), "open");
    }

    #[test]
    fn test_changes_distinguish_absent_and_null() {
        let changes: IssueChanges =
            serde_json::from_str(r#"{"body": null, "state": "closed"}"#).unwrap();
        assert_eq!(changes.body, Some(None));
        assert_eq!(changes.state, Some(Some(IssueState::Closed)));
        assert_eq!(changes.title, None);
        assert_eq!(changes.labels, None);
        assert_eq!(changes.state_reason, None);
    }

    #[test]
    fn test_changes_accept_numeric_title() {
        let changes: IssueChanges = serde_json::from_str(r#"{"title": 42}"#).unwrap();
        let title = changes.title.flatten().unwrap();
        assert_eq!(title.to_string(), "42");
    }

    #[test]
    fn test_changes_reject_unknown_state() {
        let result = serde_json::from_str::<IssueChanges>(r#"{"state": "merged"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_changes() {
        let changes: IssueChanges = serde_json::from_str("{}").unwrap();
        assert_eq!(changes, IssueChanges::default());
    }

    #[test]
    fn test_new_issue_builder() {
        let new = NewIssue::new("Second issue").with_labels(["bug", "urgent"]);
        assert_eq!(new.title, "Second issue");
        assert_eq!(new.labels, Some(vec!["bug".to_string(), "urgent".to_string()]));
        assert!(new.body.is_none());
    }
}
