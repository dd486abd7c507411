//! Carts Repository

use medistore::{cart::Cart, ids::UserId};

use crate::storage::{Storage, StorageError, load_document, save_document};

/// Storage key of a user's cart document.
pub(crate) fn cart_key(user: &UserId) -> String {
    format!("carts/{user}")
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StorageCartsRepository;

impl StorageCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn load(
        &self,
        storage: &dyn Storage,
        user: &UserId,
    ) -> Result<Cart, StorageError> {
        load_document(storage, &cart_key(user)).await
    }

    pub(crate) async fn save(
        &self,
        storage: &dyn Storage,
        user: &UserId,
        cart: &Cart,
    ) -> Result<(), StorageError> {
        save_document(storage, &cart_key(user), cart).await
    }
}
