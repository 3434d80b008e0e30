//! Shared router state.

use crate::services::IssueStore;

/// Whether the bearer gate is on, and the token it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSettings {
    /// Reject protected requests without the token
    pub required: bool,
    /// The accepted bearer token
    pub token: Option<String>,
}

impl AuthSettings {
    /// Gate disabled.
    pub fn open() -> Self {
        Self::default()
    }

    /// Gate enabled with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            required: true,
            token: Some(token.into()),
        }
    }

    /// Whether `candidate` is the configured token.
    pub fn accepts(&self, candidate: &str) -> bool {
        self.token.as_deref() == Some(candidate)
    }
}

/// State handed to every handler.
pub struct AppState {
    /// Issue and comment persistence
    pub store: IssueStore,
    /// Fixed public base URL; derived from `Host` when unset.
    pub base_url: Option<String>,
    /// Bearer gate settings
    pub auth: AuthSettings,
}

impl AppState {
    /// State with a `Host`-derived base URL.
    pub fn new(store: IssueStore, auth: AuthSettings) -> Self {
        Self {
            store,
            base_url: None,
            auth,
        }
    }

    /// Use a fixed public base URL.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }
}
