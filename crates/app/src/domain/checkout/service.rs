//! Checkout service.
//!
//! Turns a user's cart into an order. The ordered lines only leave the cart
//! once the order has been stored, so a failed checkout never loses the
//! shopper's selection. Lines added while the order is being placed stay in
//! the cart.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use medistore::{
    ids::UserId,
    orders::{NewOrder, Order},
};
use mockall::automock;
use tokio::sync::Mutex;
use tracing::{Span, info, warn};

use crate::domain::{
    carts::CartsService,
    checkout::{data::CheckoutRequest, errors::CheckoutError},
    orders::OrdersService,
};

pub struct StoreCheckoutService {
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    checkout_lock: Mutex<()>,
}

impl Debug for StoreCheckoutService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreCheckoutService").finish_non_exhaustive()
    }
}

impl StoreCheckoutService {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, orders: Arc<dyn OrdersService>) -> Self {
        Self {
            carts,
            orders,
            checkout_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(user = %user, order_id = tracing::field::Empty),
        err
    )]
    async fn checkout(
        &self,
        user: &UserId,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        let _guard = self.checkout_lock.lock().await;

        let cart = self
            .carts
            .get_cart(user)
            .await
            .map_err(CheckoutError::Cart)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let prescription_url = request
            .prescription_url
            .filter(|url| !url.trim().is_empty());

        if cart.requires_prescription() && prescription_url.is_none() {
            return Err(CheckoutError::PrescriptionRequired);
        }

        request.delivery_address.validate()?;

        let order = NewOrder::from_cart(&cart, request.delivery_address, prescription_url)?;
        let placed = self.orders.create(user, order).await?;

        Span::current().record("order_id", tracing::field::display(placed.id));

        if let Err(source) = self.carts.take_ordered(user, &cart).await {
            warn!(order_id = %placed.id, "order placed but ordered lines are still in the cart");

            return Err(CheckoutError::CartNotCleared {
                order: placed.id,
                source,
            });
        }

        info!(
            order_id = %placed.id,
            total_amount = placed.total_amount,
            requires_prescription = placed.requires_prescription,
            "checked out"
        );

        Ok(placed)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Place an order from the user's cart and take the ordered lines out of it.
    async fn checkout(
        &self,
        user: &UserId,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutError>;
}
