//! Orders

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    address::DeliveryAddress,
    cart::{Cart, CartItem},
    ids::{TypedId, UserId},
    medicines::MedicineId,
    pricing::PricingError,
};

pub mod book;
pub mod status;

pub use book::{OrderBook, OrderBookError};
pub use status::{OrderStatus, ParseStatusError, TransitionError};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Order line, frozen at placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Catalog id of the ordered medicine.
    pub medicine_id: MedicineId,
    /// Medicine name at placement.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price in paise.
    pub price: u64,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            medicine_id: item.medicine_id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id.
    pub id: OrderId,
    /// Shopper who placed the order.
    pub user_id: UserId,
    /// Lines copied from the cart.
    pub items: Vec<OrderItem>,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Total in paise, computed once at placement.
    pub total_amount: u64,
    /// Whether any line needed a prescription when the order was placed.
    pub requires_prescription: bool,
    /// Uploaded prescription, kept only for prescription orders.
    pub prescription_url: Option<String>,
    /// Where the order ships.
    pub delivery_address: DeliveryAddress,
    /// When the order was placed.
    pub created_at: Timestamp,
    /// Last status or patch change.
    pub updated_at: Timestamp,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Lines to order.
    pub items: Vec<OrderItem>,
    /// Total in paise.
    pub total_amount: u64,
    /// Whether any line needs a prescription.
    pub requires_prescription: bool,
    /// Uploaded prescription, if any.
    pub prescription_url: Option<String>,
    /// Where the order ships.
    pub delivery_address: DeliveryAddress,
}

impl NewOrder {
    /// Snapshot a cart into order data.
    ///
    /// The prescription reference is only kept when some line needs it.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the cart total overflows.
    pub fn from_cart(
        cart: &Cart,
        delivery_address: DeliveryAddress,
        prescription_url: Option<String>,
    ) -> Result<Self, PricingError> {
        let requires_prescription = cart.requires_prescription();

        Ok(Self {
            items: cart.items().iter().map(OrderItem::from).collect(),
            total_amount: cart.total()?,
            requires_prescription,
            prescription_url: prescription_url.filter(|_| requires_prescription),
            delivery_address,
        })
    }
}

/// Order Update Data
///
/// Items, totals and ownership are frozen once an order exists; status moves
/// through [`OrderBook::update_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    /// Replacement delivery address.
    pub delivery_address: Option<DeliveryAddress>,
    /// Replacement prescription reference.
    pub prescription_url: Option<String>,
}
