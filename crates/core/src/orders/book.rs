//! Order Book
//!
//! The orders document: every order in placement order plus the highest id
//! ever handed out.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::{IdError, IdPolicy, UserId},
    orders::{NewOrder, Order, OrderId, OrderPatch, OrderStatus, TransitionError},
};

/// Errors raised by order book mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderBookError {
    /// No order carries the given id.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// Orders need at least one line.
    #[error("order has no items")]
    NoItems,

    /// The requested status change is illegal.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// No id left to assign.
    #[error(transparent)]
    Id(#[from] IdError),
}

/// Orders Document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(default)]
    last_id: u64,
    orders: Vec<Order>,
}

impl OrderBook {
    /// An empty order book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every order in placement order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Orders waiting on an admin, in placement order.
    pub fn pending(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|order| order.status.is_pending())
            .cloned()
            .collect()
    }

    /// Orders owned by `user`, in placement order.
    pub fn by_user(&self, user: &UserId) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|order| &order.user_id == user)
            .cloned()
            .collect()
    }

    /// Number of orders in each status. Statuses with no orders are absent.
    pub fn status_counts(&self) -> FxHashMap<OrderStatus, usize> {
        let mut counts = FxHashMap::default();

        for order in &self.orders {
            *counts.entry(order.status).or_insert(0) += 1;
        }

        counts
    }

    /// Place a new order for `user` with status [`OrderStatus::Placed`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderBookError::NoItems`] for an empty order and
    /// [`OrderBookError::Id`] when no id is left.
    pub fn create(
        &mut self,
        user: UserId,
        order: NewOrder,
        policy: IdPolicy,
        now: Timestamp,
    ) -> Result<Order, OrderBookError> {
        if order.items.is_empty() {
            return Err(OrderBookError::NoItems);
        }

        let id = policy.next_id(self.last_id, self.orders.iter().map(|o| o.id.get()))?;

        let created = Order {
            id: OrderId::new(id),
            user_id: user,
            items: order.items,
            status: OrderStatus::Placed,
            total_amount: order.total_amount,
            requires_prescription: order.requires_prescription,
            prescription_url: order.prescription_url,
            delivery_address: order.delivery_address,
            created_at: now,
            updated_at: now,
        };

        self.last_id = self.last_id.max(id);
        self.orders.push(created.clone());

        Ok(created)
    }

    /// Apply a patch to the mutable fields of an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderBookError::NotFound`] if the id is unknown.
    pub fn update(
        &mut self,
        id: OrderId,
        patch: OrderPatch,
        now: Timestamp,
    ) -> Result<Order, OrderBookError> {
        let order = self.get_mut(id)?;

        if let Some(address) = patch.delivery_address {
            order.delivery_address = address;
        }
        if let Some(url) = patch.prescription_url {
            order.prescription_url = Some(url);
        }

        order.updated_at = now;

        Ok(order.clone())
    }

    /// Move an order one step along its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`OrderBookError::NotFound`] if the id is unknown and
    /// [`OrderBookError::Transition`] if the move is illegal; the stored
    /// status is left unchanged in both cases.
    pub fn update_status(
        &mut self,
        id: OrderId,
        status: OrderStatus,
        now: Timestamp,
    ) -> Result<Order, OrderBookError> {
        let order = self.get_mut(id)?;

        order
            .status
            .check_transition(status, order.requires_prescription)?;

        order.status = status;
        order.updated_at = now;

        Ok(order.clone())
    }

    /// Remove an order and return it.
    ///
    /// # Errors
    ///
    /// Returns [`OrderBookError::NotFound`] if the id is unknown.
    pub fn delete(&mut self, id: OrderId) -> Result<Order, OrderBookError> {
        let index = self
            .orders
            .iter()
            .position(|order| order.id == id)
            .ok_or(OrderBookError::NotFound(id))?;

        Ok(self.orders.remove(index))
    }

    fn get_mut(&mut self, id: OrderId) -> Result<&mut Order, OrderBookError> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrderBookError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{address::DeliveryAddress, medicines::MedicineId, orders::OrderItem};

    use super::*;

    fn user(id: &str) -> Result<UserId, IdError> {
        UserId::new(id)
    }

    fn new_order(requires_prescription: bool) -> NewOrder {
        NewOrder {
            items: vec![OrderItem {
                medicine_id: MedicineId::new(5),
                name: "Aspirin".to_string(),
                quantity: 2,
                price: 10_00,
            }],
            total_amount: 20_00,
            requires_prescription,
            prescription_url: requires_prescription.then(|| "/rx/1.jpg".to_string()),
            delivery_address: DeliveryAddress::default(),
        }
    }

    fn book_with(statuses: &[OrderStatus]) -> Result<OrderBook, OrderBookError> {
        let mut book = OrderBook::new();

        for status in statuses {
            let order = book.create(
                user("user123")?,
                new_order(true),
                IdPolicy::Monotonic,
                Timestamp::UNIX_EPOCH,
            )?;

            let path = [
                OrderStatus::PendingVerification,
                OrderStatus::Verified,
                OrderStatus::Dispatched,
                OrderStatus::Delivered,
            ];

            for step in path.iter().take_while(|step| *step <= status) {
                book.update_status(order.id, *step, Timestamp::UNIX_EPOCH)?;
            }
        }

        Ok(book)
    }

    #[test]
    fn create_starts_placed_with_frozen_snapshot() -> TestResult {
        let mut book = OrderBook::new();
        let now = Timestamp::from_second(1_700_000_000)?;

        let order = book.create(user("user123")?, new_order(false), IdPolicy::Monotonic, now)?;

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.total_amount, 20_00);
        assert_eq!(order.created_at, now);

        Ok(())
    }

    #[test]
    fn create_rejects_empty_orders() -> TestResult {
        let mut book = OrderBook::new();

        let result = book.create(
            user("user123")?,
            NewOrder {
                items: Vec::new(),
                ..new_order(false)
            },
            IdPolicy::Monotonic,
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(result, Err(OrderBookError::NoItems));

        Ok(())
    }

    #[test]
    fn pending_keeps_insertion_order() -> TestResult {
        let book = book_with(&[
            OrderStatus::Placed,
            OrderStatus::Dispatched,
            OrderStatus::PendingVerification,
            OrderStatus::Delivered,
            OrderStatus::Placed,
        ])?;

        let pending: Vec<u64> = book.pending().iter().map(|o| o.id.get()).collect();

        assert_eq!(pending, vec![1, 3, 5]);

        Ok(())
    }

    #[test]
    fn status_counts_group_orders() -> TestResult {
        let book = book_with(&[
            OrderStatus::Placed,
            OrderStatus::Placed,
            OrderStatus::Verified,
        ])?;

        let counts = book.status_counts();

        assert_eq!(counts.get(&OrderStatus::Placed), Some(&2));
        assert_eq!(counts.get(&OrderStatus::Verified), Some(&1));
        assert_eq!(counts.get(&OrderStatus::Delivered), None);

        Ok(())
    }

    #[test]
    fn illegal_transition_leaves_status_unchanged() -> TestResult {
        let mut book = OrderBook::new();

        let order = book.create(
            user("user123")?,
            new_order(false),
            IdPolicy::Monotonic,
            Timestamp::UNIX_EPOCH,
        )?;

        let result = book.update_status(order.id, OrderStatus::Delivered, Timestamp::UNIX_EPOCH);

        assert!(matches!(
            result,
            Err(OrderBookError::Transition(TransitionError::NotAllowed { .. }))
        ));
        assert_eq!(
            book.get(order.id).map(|o| o.status),
            Some(OrderStatus::Placed)
        );

        Ok(())
    }

    #[test]
    fn status_changes_never_touch_items_or_total() -> TestResult {
        let mut book = OrderBook::new();

        let order = book.create(
            user("user123")?,
            new_order(false),
            IdPolicy::Monotonic,
            Timestamp::UNIX_EPOCH,
        )?;

        let verified = book.update_status(order.id, OrderStatus::Verified, Timestamp::UNIX_EPOCH)?;

        assert_eq!(verified.items, order.items);
        assert_eq!(verified.total_amount, order.total_amount);

        Ok(())
    }

    #[test]
    fn by_user_filters_on_owner() -> TestResult {
        let mut book = OrderBook::new();

        for owner in ["alice", "bob", "alice"] {
            book.create(
                user(owner)?,
                new_order(false),
                IdPolicy::Monotonic,
                Timestamp::UNIX_EPOCH,
            )?;
        }

        let alice: Vec<u64> = book
            .by_user(&user("alice")?)
            .iter()
            .map(|o| o.id.get())
            .collect();

        assert_eq!(alice, vec![1, 3]);

        Ok(())
    }

    #[test]
    fn update_patches_address_only() -> TestResult {
        let mut book = OrderBook::new();

        let order = book.create(
            user("user123")?,
            new_order(false),
            IdPolicy::Monotonic,
            Timestamp::UNIX_EPOCH,
        )?;

        let address = DeliveryAddress {
            street: "4 Park Street".to_string(),
            city: "Kolkata".to_string(),
            state: "West Bengal".to_string(),
            pincode: "700016".to_string(),
        };

        let updated = book.update(
            order.id,
            OrderPatch {
                delivery_address: Some(address.clone()),
                prescription_url: None,
            },
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(updated.delivery_address, address);
        assert_eq!(updated.status, OrderStatus::Placed);
        assert_eq!(updated.total_amount, order.total_amount);

        Ok(())
    }

    #[test]
    fn reuse_freed_policy_reuses_last_order_id() -> TestResult {
        let mut book = book_with(&[OrderStatus::Placed, OrderStatus::Placed, OrderStatus::Placed])?;

        book.delete(OrderId::new(3))?;

        let order = book.create(
            user("user123")?,
            new_order(false),
            IdPolicy::ReuseFreed,
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(order.id, OrderId::new(3));

        Ok(())
    }

    #[test]
    fn unknown_order_is_not_found() {
        let mut book = OrderBook::new();
        let id = OrderId::new(7);

        assert_eq!(book.delete(id), Err(OrderBookError::NotFound(id)));
        assert_eq!(
            book.update_status(id, OrderStatus::Verified, Timestamp::UNIX_EPOCH),
            Err(OrderBookError::NotFound(id))
        );
    }
}
