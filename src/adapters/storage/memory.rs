//! In-process backend for tests and throwaway servers.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::errors::StorageError;
use crate::domain::ports::{path_segments, BlobStorage};

/// Keeps every key in an ordered map; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalize(path: &str) -> Result<String, StorageError> {
    Ok(path_segments(path)?.join("/"))
}

#[async_trait]
impl BlobStorage for InMemoryStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = normalize(path)?;
        self.entries
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let key = normalize(path)?;
        self.entries.write().await.insert(key, data.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let key = normalize(path)?;
        Ok(self.entries.read().await.contains_key(&key))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let dir = format!("{}/", normalize(prefix)?);
        let entries = self.entries.read().await;

        let mut children: Vec<String> = Vec::new();
        for key in entries.range(dir.clone()..).map(|(k, _)| k) {
            let Some(rest) = key.strip_prefix(&dir) else {
                break;
            };
            let child = rest.split('/').next().unwrap_or(rest);
            if children.last().map(String::as_str) != Some(child) {
                children.push(child.to_string());
            }
        }

        if children.is_empty() {
            return Err(StorageError::NotFound(prefix.to_string()));
        }
        Ok(children)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let key = normalize(path)?;
        self.entries
            .write()
            .await
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_collapses_nested_keys_into_children() {
        let storage = InMemoryStorage::new();
        storage.write("repos/octo/hello/counter.txt", b"2").await.unwrap();
        storage
            .write("repos/octo/hello/issues/1/issue.json", b"{}")
            .await
            .unwrap();
        storage
            .write("repos/octo/hello/issues/2/issue.json", b"{}")
            .await
            .unwrap();
        storage.write("repos/octo/world/counter.txt", b"1").await.unwrap();

        assert_eq!(storage.list("repos").await.unwrap(), vec!["octo"]);
        assert_eq!(
            storage.list("repos/octo/").await.unwrap(),
            vec!["hello", "world"]
        );
        assert_eq!(
            storage.list("repos/octo/hello/issues").await.unwrap(),
            vec!["1", "2"]
        );
    }

    #[tokio::test]
    async fn test_list_does_not_match_sibling_prefixes() {
        let storage = InMemoryStorage::new();
        storage.write("repos/octo-other/r/counter.txt", b"1").await.unwrap();

        let err = storage.list("repos/octo").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_keys_are_not_found() {
        let storage = InMemoryStorage::new();
        assert!(storage.read("a").await.unwrap_err().is_not_found());
        assert!(storage.delete("a").await.unwrap_err().is_not_found());
        assert!(storage.list("a").await.unwrap_err().is_not_found());
        assert!(!storage.exists("a").await.unwrap());
    }
}
