//! Orders service errors.

use medistore::{
    ids::IdError,
    orders::{OrderBookError, OrderId, OrderStatus, TransitionError},
};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("order has no items")]
    NoItems,

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
        #[source]
        source: TransitionError,
    },

    #[error("no order ids left to assign")]
    IdsExhausted(#[source] IdError),

    #[error("storage error")]
    Storage(#[from] StorageError),
}

impl OrdersServiceError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(error) if error.is_transient())
    }
}

impl From<OrderBookError> for OrdersServiceError {
    fn from(error: OrderBookError) -> Self {
        match error {
            OrderBookError::NotFound(id) => Self::NotFound(id),
            OrderBookError::NoItems => Self::NoItems,
            OrderBookError::Id(source) => Self::IdsExhausted(source),
            OrderBookError::Transition(source) => Self::InvalidTransition {
                from: source.from(),
                to: source.to(),
                source,
            },
        }
    }
}
