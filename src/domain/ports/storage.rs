//! The blob storage port.

use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Byte-oriented key/value storage addressed by `/`-separated paths.
///
/// Backends know nothing about JSON or issues; they only keep bytes durable
/// at a path. A missing key is reported as [`StorageError::NotFound`].
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Read the bytes stored at `path`.
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Store `data` at `path`, replacing any previous value.
    async fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Whether a value is stored at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// List the immediate child names under `prefix`, sorted.
    ///
    /// Children are returned without the prefix and without a trailing
    /// slash. An unknown prefix is `NotFound`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Remove the value stored at `path`.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Split a storage path into its segments, rejecting anything that could
/// escape the storage root.
pub fn path_segments(path: &str) -> Result<Vec<&str>, StorageError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || *s == "." || *s == ".." || s.contains('\\'))
    {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_accepts_nested_paths() {
        let segments = path_segments("repos/octo/hello/counter.txt").unwrap();
        assert_eq!(segments, vec!["repos", "octo", "hello", "counter.txt"]);
    }

    #[test]
    fn test_path_segments_ignores_outer_slashes() {
        assert_eq!(path_segments("/repos/").unwrap(), vec!["repos"]);
    }

    #[test]
    fn test_path_segments_rejects_traversal() {
        for bad in ["", "/", "repos/../etc", "repos//x", "./repos", "a\\b"] {
            assert!(
                matches!(path_segments(bad), Err(StorageError::InvalidPath(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
