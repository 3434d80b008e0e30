//! GitHub "simple user" objects.

use serde::{Deserialize, Serialize};

/// A user as embedded in issue and comment payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleUser {
    /// Username
    pub login: String,
    /// Numeric id derived from the login
    pub id: u64,
    /// GraphQL-style node id
    pub node_id: String,
    /// Avatar image URL; empty locally
    pub avatar_url: String,
    /// Always empty
    pub gravatar_id: String,
    /// API URL of the user
    pub url: String,
    /// Profile URL
    pub html_url: String,
    /// Followers list URL
    pub followers_url: String,
    /// URI template for followed users
    pub following_url: String,
    /// URI template for gists
    pub gists_url: String,
    /// URI template for starred repositories
    pub starred_url: String,
    /// Watched repositories URL
    pub subscriptions_url: String,
    /// Organization list URL
    pub organizations_url: String,
    /// Repository list URL
    pub repos_url: String,
    /// URI template for events
    pub events_url: String,
    /// Received events URL
    pub received_events_url: String,
    /// Account type, `User` for local actors
    #[serde(rename = "type")]
    pub user_type: String,
    /// Always false
    pub site_admin: bool,
}
