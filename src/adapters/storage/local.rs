//! Filesystem backend: one file per key under a root directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::errors::StorageError;
use crate::domain::ports::{path_segments, BlobStorage};

/// Stores each key as a file at `<root>/<path>`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Backend rooted at `root`; created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding all keys.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut full = self.root.clone();
        full.extend(path_segments(path)?);
        Ok(full)
    }
}

fn io_error(path: &str, source: std::io::Error) -> StorageError {
    if source.kind() == ErrorKind::NotFound {
        StorageError::NotFound(path.to_string())
    } else {
        StorageError::Io {
            path: path.to_string(),
            source,
        }
    }
}

#[async_trait]
impl BlobStorage for LocalFileStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        fs::read(&full).await.map_err(|e| io_error(path, e))
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, e))?;
        }
        fs::write(&full, data).await.map_err(|e| io_error(path, e))
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(path, e)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let full = self.resolve(prefix)?;
        let mut entries = fs::read_dir(&full).await.map_err(|e| io_error(prefix, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(prefix, e))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        fs::remove_file(&full).await.map_err(|e| io_error(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, LocalFileStorage) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = LocalFileStorage::new(dir.path());
        (dir, storage)
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (_dir, storage) = storage();
        storage
            .write("repos/octo/hello/issues/1/issue.json", b"{}")
            .await
            .unwrap();

        let data = storage
            .read("repos/octo/hello/issues/1/issue.json")
            .await
            .unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, storage) = storage();
        let err = storage.read("repos/octo/missing.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_returns_sorted_children() {
        let (_dir, storage) = storage();
        storage.write("repos/zeta/r/counter.txt", b"1").await.unwrap();
        storage.write("repos/alpha/r/counter.txt", b"1").await.unwrap();

        let owners = storage.list("repos").await.unwrap();
        assert_eq!(owners, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_not_found() {
        let (_dir, storage) = storage();
        let err = storage.list("repos").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let (_dir, storage) = storage();
        storage.write("a/b.json", b"x").await.unwrap();
        assert!(storage.exists("a/b.json").await.unwrap());
        assert!(!storage.exists("a").await.unwrap());

        storage.delete("a/b.json").await.unwrap();
        assert!(!storage.exists("a/b.json").await.unwrap());
        assert!(storage.delete("a/b.json").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let (_dir, storage) = storage();
        let err = storage.write("../escape.txt", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }
}
