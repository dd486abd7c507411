//! Orders service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use medistore::{
    ids::{IdPolicy, UserId},
    orders::{NewOrder, Order, OrderId, OrderPatch, OrderStatus},
};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{Span, info};

use crate::{
    domain::orders::{errors::OrdersServiceError, repository::StorageOrdersRepository},
    storage::Storage,
};

/// Order workflow over a single [`Storage`] document.
pub struct StorageOrdersService {
    storage: Arc<dyn Storage>,
    repository: StorageOrdersRepository,
    policy: IdPolicy,
    write_lock: Mutex<()>,
}

impl Debug for StorageOrdersService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageOrdersService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl StorageOrdersService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, policy: IdPolicy) -> Self {
        Self {
            storage,
            repository: StorageOrdersRepository::new(),
            policy,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl OrdersService for StorageOrdersService {
    #[tracing::instrument(
        name = "orders.service.create",
        skip(self, order),
        fields(
            user = %user,
            order_id = tracing::field::Empty,
            item_count = order.items.len(),
            requires_prescription = order.requires_prescription
        ),
        err
    )]
    async fn create(&self, user: &UserId, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.repository.load(self.storage.as_ref()).await?;
        let created = book.create(user.clone(), order, self.policy, Timestamp::now())?;

        self.repository.save(self.storage.as_ref(), &book).await?;

        Span::current().record("order_id", tracing::field::display(created.id));

        info!(order_id = %created.id, total_amount = created.total_amount, "placed order");

        Ok(created)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, OrdersServiceError> {
        let book = self.repository.load(self.storage.as_ref()).await?;

        book.get(id).cloned().ok_or(OrdersServiceError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let book = self.repository.load(self.storage.as_ref()).await?;

        Ok(book.orders().to_vec())
    }

    async fn get_pending_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let book = self.repository.load(self.storage.as_ref()).await?;

        Ok(book.pending())
    }

    async fn get_by_user(&self, user: &UserId) -> Result<Vec<Order>, OrdersServiceError> {
        let book = self.repository.load(self.storage.as_ref()).await?;

        Ok(book.by_user(user))
    }

    async fn status_counts(&self) -> Result<FxHashMap<OrderStatus, usize>, OrdersServiceError> {
        let book = self.repository.load(self.storage.as_ref()).await?;

        Ok(book.status_counts())
    }

    #[tracing::instrument(
        name = "orders.service.update",
        skip(self, patch),
        fields(order_id = %id),
        err
    )]
    async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<Order, OrdersServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.repository.load(self.storage.as_ref()).await?;
        let updated = book.update(id, patch, Timestamp::now())?;

        self.repository.save(self.storage.as_ref(), &book).await?;

        info!(order_id = %id, "updated order");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self),
        fields(order_id = %id, status = %status),
        err
    )]
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.repository.load(self.storage.as_ref()).await?;
        let updated = book.update_status(id, status, Timestamp::now())?;

        self.repository.save(self.storage.as_ref(), &book).await?;

        info!(order_id = %id, status = %status, "moved order");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.delete",
        skip(self),
        fields(order_id = %id),
        err
    )]
    async fn delete(&self, id: OrderId) -> Result<Order, OrdersServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.repository.load(self.storage.as_ref()).await?;
        let deleted = book.delete(id)?;

        self.repository.save(self.storage.as_ref(), &book).await?;

        info!(order_id = %id, "deleted order");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for `user` with status `placed`.
    async fn create(&self, user: &UserId, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_by_id(&self, id: OrderId) -> Result<Order, OrdersServiceError>;

    /// Every order in placement order.
    async fn list_all(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders still waiting on an admin, in placement order.
    async fn get_pending_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders owned by `user`, in placement order.
    async fn get_by_user(&self, user: &UserId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Number of orders per status.
    async fn status_counts(&self) -> Result<FxHashMap<OrderStatus, usize>, OrdersServiceError>;

    /// Change the delivery address or prescription reference of an order.
    async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<Order, OrdersServiceError>;

    /// Move an order one legal step along its lifecycle.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Remove an order and return it.
    async fn delete(&self, id: OrderId) -> Result<Order, OrdersServiceError>;
}
