//! Domain errors for the issue store and its storage port.

use thiserror::Error;

/// Errors raised by a [`BlobStorage`](crate::domain::ports::BlobStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing is stored at the path.
    #[error("Storage key not found: {0}")]
    NotFound(String),

    /// Empty, `.`/`..` or otherwise unsafe path segment.
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    /// Backend I/O failure.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        /// Key being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Whether this error means the key simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors raised by the issue store.
///
/// Missing issues and comments are not errors: store methods return `None`
/// (or `false`) for those. The HTTP layer answers an invalid owner or repo
/// path with a 404 and everything else with a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed or rejected the path.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored document is not valid JSON for its type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A counter document does not hold an integer.
    #[error("Corrupt counter at {path}: {value:?}")]
    CorruptCounter {
        /// Counter key
        path: String,
        /// Raw stored text
        value: String,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
