//! Cart change notifications

use medistore::ids::UserId;

/// Buffered events per subscriber before the slowest one starts lagging.
pub const CART_EVENT_CAPACITY: usize = 64;

/// Emitted after every cart mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    /// Owner of the cart that changed.
    pub user: UserId,

    /// Units in the cart after the change.
    pub item_count: u64,
}
