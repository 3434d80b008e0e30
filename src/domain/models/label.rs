//! Issue labels.

use serde::{Deserialize, Serialize};

/// A label attached to an issue.
///
/// Labels have no lifecycle of their own: they are rebuilt from their names
/// whenever an issue's label list is set, so `id` is derived, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// `issue_number * 100 + position`
    pub id: u64,
    /// GraphQL-style node id
    pub node_id: String,
    /// API URL of the label
    pub url: String,
    /// Label name
    pub name: String,
    /// Always null
    pub description: Option<String>,
    /// Hex color without `#`
    pub color: String,
    /// Always false
    pub default: bool,
}
