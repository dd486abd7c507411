//! Carts service errors.

use medistore::{cart::CartError, medicines::MedicineId, pricing::PricingError};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("quantity overflow for medicine {0}")]
    QuantityOverflow(MedicineId),

    #[error("medicine {0} is out of stock")]
    OutOfStock(MedicineId),

    #[error("cart total is out of range")]
    TotalOverflow(#[source] PricingError),

    #[error("storage error")]
    Storage(#[from] StorageError),
}

impl CartsServiceError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(error) if error.is_transient())
    }
}

impl From<CartError> for CartsServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::QuantityOverflow(id) => Self::QuantityOverflow(id),
            CartError::OutOfStock(id) => Self::OutOfStock(id),
        }
    }
}

impl From<PricingError> for CartsServiceError {
    fn from(error: PricingError) -> Self {
        Self::TotalOverflow(error)
    }
}
