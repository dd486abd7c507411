//! App Context

use std::{path::Path, sync::Arc};

use medistore::ids::IdPolicy;
use thiserror::Error;

use crate::{
    carts::{CartsService, StorageCartsService},
    checkout::{CheckoutService, StoreCheckoutService},
    medicines::{MedicinesService, StorageMedicinesService},
    orders::{OrdersService, StorageOrdersService},
    storage::{FileStorage, Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open data directory")]
    Storage(#[source] StorageError),
}

#[derive(Clone)]
pub struct AppContext {
    pub medicines: Arc<dyn MedicinesService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context over any document storage.
    #[must_use]
    pub fn from_storage(storage: Arc<dyn Storage>, policy: IdPolicy) -> Self {
        let carts: Arc<dyn CartsService> = Arc::new(StorageCartsService::new(storage.clone()));
        let orders: Arc<dyn OrdersService> =
            Arc::new(StorageOrdersService::new(storage.clone(), policy));

        Self {
            medicines: Arc::new(StorageMedicinesService::new(storage, policy)),
            checkout: Arc::new(StoreCheckoutService::new(carts.clone(), orders.clone())),
            carts,
            orders,
        }
    }

    /// Build application context over a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created.
    pub async fn from_data_dir(path: &Path, policy: IdPolicy) -> Result<Self, AppInitError> {
        let storage = FileStorage::open(path)
            .await
            .map_err(AppInitError::Storage)?;

        Ok(Self::from_storage(Arc::new(storage), policy))
    }
}
