//! Document storage
//!
//! Every store persists a single serde document under a string key. The
//! [`Storage`] trait is the only seam between services and the backing medium.

use async_trait::async_trait;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};

pub mod errors;
pub mod file;
pub mod memory;

pub use errors::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Keyed byte storage.
#[automock]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the bytes stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the bytes stored under `key`.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Drop `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Check a key is one or more `[A-Za-z0-9_-]` segments joined by `/`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Load the JSON document under `key`, or its default when absent.
pub(crate) async fn load_document<T>(storage: &dyn Storage, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match storage.read(key).await? {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        }),
        None => Ok(T::default()),
    }
}

/// Serialize `document` as JSON and store it under `key`.
pub(crate) async fn save_document<T>(
    storage: &dyn Storage,
    key: &str,
    document: &T,
) -> Result<(), StorageError>
where
    T: Serialize + Sync,
{
    let bytes = serde_json::to_vec_pretty(document).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;

    storage.write(key, bytes).await
}
