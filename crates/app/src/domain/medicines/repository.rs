//! Medicines Repository

use medistore::medicines::Catalog;

use crate::storage::{Storage, StorageError, load_document, save_document};

/// Storage key of the catalog document.
pub(crate) const CATALOG_KEY: &str = "medicines";

#[derive(Debug, Clone, Default)]
pub(crate) struct StorageCatalogRepository;

impl StorageCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn load(&self, storage: &dyn Storage) -> Result<Catalog, StorageError> {
        load_document(storage, CATALOG_KEY).await
    }

    pub(crate) async fn save(
        &self,
        storage: &dyn Storage,
        catalog: &Catalog,
    ) -> Result<(), StorageError> {
        save_document(storage, CATALOG_KEY, catalog).await
    }
}
