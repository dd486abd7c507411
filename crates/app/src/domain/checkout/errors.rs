//! Checkout errors.

use medistore::{address::AddressError, orders::OrderId, pricing::PricingError};
use thiserror::Error;

use crate::domain::{carts::CartsServiceError, orders::OrdersServiceError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("a prescription is required for this cart")]
    PrescriptionRequired,

    #[error("invalid delivery address")]
    InvalidAddress(#[from] AddressError),

    #[error("cart total is out of range")]
    TotalOverflow(#[from] PricingError),

    #[error("failed to read cart")]
    Cart(#[source] CartsServiceError),

    #[error("failed to place order")]
    Order(#[from] OrdersServiceError),

    #[error("order {order} was placed but its lines could not be taken out of the cart")]
    CartNotCleared {
        order: OrderId,
        #[source]
        source: CartsServiceError,
    },
}

impl CheckoutError {
    /// Whether retrying may succeed. A placed order is never retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Cart(error) => error.is_transient(),
            Self::Order(error) => error.is_transient(),
            _ => false,
        }
    }

    /// The order that was placed before the failure, if any.
    pub fn placed_order(&self) -> Option<OrderId> {
        match self {
            Self::CartNotCleared { order, .. } => Some(*order),
            _ => None,
        }
    }
}
