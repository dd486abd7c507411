//! Orders Repository

use medistore::orders::OrderBook;

use crate::storage::{Storage, StorageError, load_document, save_document};

/// Storage key of the orders document.
pub(crate) const ORDERS_KEY: &str = "orders";

#[derive(Debug, Clone, Default)]
pub(crate) struct StorageOrdersRepository;

impl StorageOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn load(&self, storage: &dyn Storage) -> Result<OrderBook, StorageError> {
        load_document(storage, ORDERS_KEY).await
    }

    pub(crate) async fn save(
        &self,
        storage: &dyn Storage,
        book: &OrderBook,
    ) -> Result<(), StorageError> {
        save_document(storage, ORDERS_KEY, book).await
    }
}
