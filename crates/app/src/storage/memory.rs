//! In-memory storage

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::storage::{Storage, StorageError, validate_key};

/// Process-local storage. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<RwLock<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;

        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_key(key)?;

        self.documents.write().await.insert(key.to_string(), bytes);

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.documents.write().await.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn clones_share_documents() -> TestResult {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.write("orders", b"[]".to_vec()).await?;

        assert_eq!(clone.read("orders").await?, Some(b"[]".to_vec()));

        clone.remove("orders").await?;

        assert_eq!(storage.read("orders").await?, None);

        Ok(())
    }
}
