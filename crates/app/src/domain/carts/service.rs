//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use medistore::{
    cart::{Cart, CartItem},
    ids::UserId,
    medicines::MedicineId,
};
use mockall::automock;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};

use crate::{
    domain::carts::{
        errors::CartsServiceError,
        events::{CART_EVENT_CAPACITY, CartEvent},
        repository::StorageCartsRepository,
    },
    storage::Storage,
};

/// Cart store over one [`Storage`] document per user.
pub struct StorageCartsService {
    storage: Arc<dyn Storage>,
    repository: StorageCartsRepository,
    events: broadcast::Sender<CartEvent>,
    write_lock: Mutex<()>,
}

impl Debug for StorageCartsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageCartsService")
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

impl StorageCartsService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (events, _) = broadcast::channel(CART_EVENT_CAPACITY);

        Self {
            storage,
            repository: StorageCartsRepository::new(),
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Load, change and store a cart, then announce the change.
    ///
    /// The cart is written and announced even when `apply` leaves it unchanged.
    async fn mutate<F>(&self, user: &UserId, apply: F) -> Result<Cart, CartsServiceError>
    where
        F: FnOnce(&mut Cart) -> Result<(), CartsServiceError> + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut cart = self.repository.load(self.storage.as_ref(), user).await?;

        apply(&mut cart)?;

        self.repository
            .save(self.storage.as_ref(), user, &cart)
            .await?;

        self.notify(user, &cart);

        Ok(cart)
    }

    fn notify(&self, user: &UserId, cart: &Cart) {
        let item_count = cart.item_count();

        let receivers = self
            .events
            .send(CartEvent {
                user: user.clone(),
                item_count,
            })
            .unwrap_or_default();

        debug!(user = %user, item_count, receivers, "cart updated");
    }
}

#[async_trait]
impl CartsService for StorageCartsService {
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        Ok(self.repository.load(self.storage.as_ref(), user).await?)
    }

    async fn get_items(&self, user: &UserId) -> Result<Vec<CartItem>, CartsServiceError> {
        Ok(self.get_cart(user).await?.into_items())
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(user = %user, medicine_id = %item.medicine_id, quantity = item.quantity),
        err
    )]
    async fn add_item(&self, user: &UserId, item: CartItem) -> Result<Cart, CartsServiceError> {
        let medicine_id = item.medicine_id;

        let cart = self
            .mutate(user, move |cart| Ok(cart.add(item)?))
            .await?;

        info!(user = %user, medicine_id = %medicine_id, "added item to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(user = %user, medicine_id = %medicine),
        err
    )]
    async fn update_quantity(
        &self,
        user: &UserId,
        medicine: MedicineId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(user, move |cart| {
            if !cart.update_quantity(medicine, quantity) {
                debug!(medicine_id = %medicine, "medicine not in cart");
            }

            Ok(())
        })
        .await
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user = %user, medicine_id = %medicine),
        err
    )]
    async fn remove_item(
        &self,
        user: &UserId,
        medicine: MedicineId,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(user, move |cart| {
            if !cart.remove(medicine) {
                debug!(medicine_id = %medicine, "medicine not in cart");
            }

            Ok(())
        })
        .await
    }

    #[tracing::instrument(
        name = "carts.service.clear",
        skip(self),
        fields(user = %user),
        err
    )]
    async fn clear(&self, user: &UserId) -> Result<(), CartsServiceError> {
        self.mutate(user, |cart| {
            cart.clear();

            Ok(())
        })
        .await?;

        info!(user = %user, "cleared cart");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.take_ordered",
        skip(self, ordered),
        fields(user = %user, ordered_units = ordered.item_count()),
        err
    )]
    async fn take_ordered(
        &self,
        user: &UserId,
        ordered: &Cart,
    ) -> Result<Cart, CartsServiceError> {
        let cart = self
            .mutate(user, |cart| {
                cart.take_ordered(ordered);

                Ok(())
            })
            .await?;

        info!(
            user = %user,
            remaining = cart.item_count(),
            "took ordered items out of cart"
        );

        Ok(cart)
    }

    async fn get_total(&self, user: &UserId) -> Result<u64, CartsServiceError> {
        Ok(self.get_cart(user).await?.total()?)
    }

    async fn item_count(&self, user: &UserId) -> Result<u64, CartsServiceError> {
        Ok(self.get_cart(user).await?.item_count())
    }

    fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a user's cart; a user without one gets an empty cart.
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// The lines of a user's cart in insertion order.
    async fn get_items(&self, user: &UserId) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Add a line, merging quantities with an existing line for the same medicine.
    async fn add_item(&self, user: &UserId, item: CartItem) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of a line; zero removes it, an absent medicine is ignored.
    async fn update_quantity(
        &self,
        user: &UserId,
        medicine: MedicineId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line; an absent medicine is ignored.
    async fn remove_item(
        &self,
        user: &UserId,
        medicine: MedicineId,
    ) -> Result<Cart, CartsServiceError>;

    /// Empty a user's cart.
    async fn clear(&self, user: &UserId) -> Result<(), CartsServiceError>;

    /// Remove the units of an ordered snapshot, keeping anything added since.
    async fn take_ordered(
        &self,
        user: &UserId,
        ordered: &Cart,
    ) -> Result<Cart, CartsServiceError>;

    /// Sum of `price × quantity` in paise.
    async fn get_total(&self, user: &UserId) -> Result<u64, CartsServiceError>;

    /// Total units in the cart.
    async fn item_count(&self, user: &UserId) -> Result<u64, CartsServiceError>;

    /// Receive an event after every cart mutation.
    fn subscribe(&self) -> broadcast::Receiver<CartEvent>;
}
