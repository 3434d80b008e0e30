//! Storage backends implementing the [`BlobStorage`] port.

mod local;
mod memory;

pub use local::LocalFileStorage;
pub use memory::InMemoryStorage;

use std::sync::Arc;

use crate::domain::models::{Config, StorageProvider};
use crate::domain::ports::BlobStorage;

/// Build the storage backend selected by `storage.provider`.
pub fn create_storage(config: &Config) -> Arc<dyn BlobStorage> {
    match config.storage.provider {
        StorageProvider::Local => Arc::new(LocalFileStorage::new(config.storage_root())),
        StorageProvider::Memory => Arc::new(InMemoryStorage::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage_memory_provider() {
        let mut config = Config::default();
        config.storage.provider = StorageProvider::Memory;
        let storage = create_storage(&config);

        storage.write("repos/a/b/counter.txt", b"1").await.unwrap();
        assert_eq!(storage.read("repos/a/b/counter.txt").await.unwrap(), b"1");
    }

    #[tokio::test]
    async fn test_create_storage_local_provider_uses_storage_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let storage = create_storage(&config);

        storage.write("repos/a/b/counter.txt", b"3").await.unwrap();
        assert!(dir.path().join("storage/repos/a/b/counter.txt").is_file());
    }
}
