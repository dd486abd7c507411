//! File storage
//!
//! One JSON file per key under a data directory. `carts/user123` lives at
//! `<root>/carts/user123.json`.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::storage::{Storage, StorageError, validate_key};

const EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Use `root` as the data directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::io(&root.display().to_string(), source))?;

        Ok(Self { root })
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.root.join(key).with_extension(EXTENSION))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path(key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::io(key, error)),
        }
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let temp = path.with_extension(TEMP_EXTENSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::io(key, source))?;
        }

        fs::write(&temp, &bytes)
            .await
            .map_err(|source| StorageError::io(key, source))?;

        if let Err(source) = fs::rename(&temp, &path).await {
            _ = fs::remove_file(&temp).await;

            return Err(StorageError::io(key, source));
        }

        debug!(key, bytes = bytes.len(), "wrote document");

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::io(key, error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn documents_survive_reopening() -> TestResult {
        let dir = tempfile::tempdir()?;

        FileStorage::open(dir.path())
            .await?
            .write("carts/user123", b"[]".to_vec())
            .await?;

        let reopened = FileStorage::open(dir.path()).await?;

        assert_eq!(reopened.read("carts/user123").await?, Some(b"[]".to_vec()));
        assert!(dir.path().join("carts").join("user123.json").exists());
        assert!(!dir.path().join("carts").join("user123.json.tmp").exists());

        Ok(())
    }

    #[tokio::test]
    async fn missing_document_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::open(dir.path()).await?;

        assert_eq!(storage.read("orders").await?, None);

        storage.remove("orders").await?;

        Ok(())
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::open(dir.path().join("data")).await?;

        let result = storage.write("../escape", b"x".to_vec()).await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(!dir.path().join("escape.json").exists());

        Ok(())
    }
}
