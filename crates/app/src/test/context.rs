//! Test context for service-level tests.

use std::sync::Arc;

use medistore::ids::{IdPolicy, UserId};

use crate::{
    domain::{
        carts::StorageCartsService, checkout::StoreCheckoutService,
        medicines::StorageMedicinesService, orders::StorageOrdersService,
    },
    storage::MemoryStorage,
};

/// Default shopper used by service tests.
pub(crate) const TEST_USER: &str = "user123";

/// Fresh stores over an isolated [`MemoryStorage`].
pub(crate) struct TestContext {
    pub user: UserId,
    pub medicines: Arc<StorageMedicinesService>,
    pub carts: Arc<StorageCartsService>,
    pub orders: Arc<StorageOrdersService>,
    pub checkout: Arc<StoreCheckoutService>,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self::with_policy(IdPolicy::default())
    }

    pub(crate) fn with_policy(policy: IdPolicy) -> Self {
        let shared = Arc::new(MemoryStorage::new());

        let carts = Arc::new(StorageCartsService::new(shared.clone()));
        let orders = Arc::new(StorageOrdersService::new(shared.clone(), policy));

        Self {
            user: UserId::new(TEST_USER).expect("test user id is valid"),
            medicines: Arc::new(StorageMedicinesService::new(shared, policy)),
            checkout: Arc::new(StoreCheckoutService::new(carts.clone(), orders.clone())),
            carts,
            orders,
        }
    }
}
