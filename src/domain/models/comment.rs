//! Issue comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::iso_seconds;
use super::user::SimpleUser;

/// A GitHub-shaped issue comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Per-repository comment id, starting at 1
    pub id: u64,
    /// GraphQL-style node id
    pub node_id: String,
    /// API URL of this comment
    pub url: String,
    /// Issue URL with an `#issuecomment-{id}` anchor
    pub html_url: String,
    /// API URL of the parent issue
    pub issue_url: String,
    /// Author
    pub user: SimpleUser,
    /// Creation time, whole seconds
    #[serde(with = "iso_seconds")]
    pub created_at: DateTime<Utc>,
    /// Last modification time, whole seconds
    #[serde(with = "iso_seconds")]
    pub updated_at: DateTime<Utc>,
    /// Markdown body
    pub body: String,
    /// Author relationship to the repository
    pub author_association: String,
    /// Absent until the comment is first pinned or unpinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// A comment as persisted: the public payload plus the number of the issue
/// it belongs to.
///
/// `issue_number` is a plain identifier, not an owning link; deleting a
/// comment never touches the issue record beyond its counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Number of the issue the comment belongs to
    pub issue_number: u64,
    /// The public payload
    #[serde(flatten)]
    pub comment: Comment,
}
