//! Checkout Data

use medistore::address::DeliveryAddress;

/// What the shopper submits with their cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub delivery_address: DeliveryAddress,

    /// Reference to an uploaded prescription.
    pub prescription_url: Option<String>,
}
