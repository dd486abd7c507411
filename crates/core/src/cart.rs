//! Cart
//!
//! A shopper's pending selection, one line per medicine. Lines snapshot the
//! name, price and prescription flag at the time they were first added.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    medicines::{Medicine, MedicineId},
    pricing::{self, PricingError},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Lines are added with at least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Merging would overflow the line quantity.
    #[error("quantity overflow for medicine {0}")]
    QuantityOverflow(MedicineId),

    /// The medicine has no stock left.
    #[error("medicine {0} is out of stock")]
    OutOfStock(MedicineId),
}

/// Cart Item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog id of the medicine.
    pub medicine_id: MedicineId,
    /// Medicine name when the line was first added.
    pub name: String,
    /// Unit price in paise when the line was first added.
    pub price: u64,
    /// Units in the cart.
    pub quantity: u32,
    /// Whether the medicine needs a prescription.
    pub requires_prescription: bool,
}

impl CartItem {
    /// Snapshot a catalog medicine into a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the medicine has no stock.
    pub fn from_medicine(medicine: &Medicine, quantity: u32) -> Result<Self, CartError> {
        if medicine.stock == 0 {
            return Err(CartError::OutOfStock(medicine.id));
        }

        Ok(Self {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
            price: medicine.price,
            quantity,
            requires_prescription: medicine.requires_prescription,
        })
    }

    /// `price × quantity` for this line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total overflows.
    pub fn line_total(&self) -> Result<u64, PricingError> {
        pricing::line_total(self.price, self.quantity)
    }
}

/// Cart Document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a medicine.
    pub fn get(&self, medicine: MedicineId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.medicine_id == medicine)
    }

    /// Add a line, or increase the quantity of the existing line for the same medicine.
    ///
    /// The existing line keeps its original name, price and prescription snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity and
    /// [`CartError::QuantityOverflow`] if the merged quantity does not fit.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        match self
            .items
            .iter_mut()
            .find(|existing| existing.medicine_id == item.medicine_id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CartError::QuantityOverflow(item.medicine_id))?;
            }
            None => self.items.push(item),
        }

        Ok(())
    }

    /// Set the absolute quantity of a line; zero removes it.
    ///
    /// Returns `false` when the medicine is not in the cart.
    pub fn update_quantity(&mut self, medicine: MedicineId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(medicine);
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.medicine_id == medicine)
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for a medicine. Returns `false` when it was not in the cart.
    pub fn remove(&mut self, medicine: MedicineId) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.medicine_id != medicine);

        self.items.len() != before
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take the units of an ordered snapshot out of the cart.
    ///
    /// Each line loses the quantity it had in `ordered` and is dropped once it
    /// reaches zero. Lines and units added after the snapshot stay.
    pub fn take_ordered(&mut self, ordered: &Cart) {
        for line in &ordered.items {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.medicine_id == line.medicine_id)
            {
                item.quantity = item.quantity.saturating_sub(line.quantity);
            }
        }

        self.items.retain(|item| item.quantity > 0);
    }

    /// Sum of `price × quantity` over every line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in a `u64`.
    pub fn total(&self) -> Result<u64, PricingError> {
        pricing::total(self.items.iter().map(|item| (item.price, item.quantity)))
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Whether any line needs a prescription before it can be ordered.
    pub fn requires_prescription(&self) -> bool {
        self.items.iter().any(|item| item.requires_prescription)
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(id: u64, price: u64, quantity: u32) -> CartItem {
        CartItem {
            medicine_id: MedicineId::new(id),
            name: format!("Medicine {id}"),
            price,
            quantity,
            requires_prescription: false,
        }
    }

    #[test]
    fn repeated_adds_merge_quantities() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(5, 10_00, 2))?;
        cart.add(item(5, 12_00, 3))?;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(MedicineId::new(5)).map(|i| i.quantity), Some(5));
        assert_eq!(
            cart.get(MedicineId::new(5)).map(|i| i.price),
            Some(10_00),
            "merge must keep the first price snapshot"
        );

        Ok(())
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let mut cart = Cart::new();

        assert_eq!(cart.add(item(1, 1_00, 0)), Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn merge_overflow_is_rejected_and_leaves_line_untouched() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, u32::MAX))?;

        let result = cart.add(item(1, 1_00, 1));

        assert_eq!(
            result,
            Err(CartError::QuantityOverflow(MedicineId::new(1)))
        );
        assert_eq!(
            cart.get(MedicineId::new(1)).map(|i| i.quantity),
            Some(u32::MAX)
        );

        Ok(())
    }

    #[test]
    fn update_quantity_sets_absolute_value() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, 4))?;

        assert!(cart.update_quantity(MedicineId::new(1), 2));
        assert_eq!(cart.get(MedicineId::new(1)).map(|i| i.quantity), Some(2));

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, 4))?;

        assert!(cart.update_quantity(MedicineId::new(1), 0));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_and_remove_unknown_medicine_are_no_ops() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, 1))?;

        assert!(!cart.update_quantity(MedicineId::new(2), 3));
        assert!(!cart.remove(MedicineId::new(2)));
        assert_eq!(cart.items().len(), 1);

        Ok(())
    }

    #[test]
    fn total_tracks_updates_and_removals() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 10_00, 2))?;
        cart.add(item(2, 4_50, 1))?;

        assert_eq!(cart.total()?, 24_50);

        cart.update_quantity(MedicineId::new(1), 1);
        assert_eq!(cart.total()?, 14_50);

        cart.remove(MedicineId::new(2));
        assert_eq!(cart.total()?, 10_00);

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, 2))?;
        cart.add(item(2, 1_00, 3))?;

        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn out_of_stock_medicine_cannot_become_a_line() {
        let medicine = Medicine {
            id: MedicineId::new(7),
            name: "Telma 40".to_string(),
            generic_name: "Telmisartan".to_string(),
            brand: "Glenmark".to_string(),
            category: "Cardiac Care".to_string(),
            price: 220_40,
            stock: 0,
            requires_prescription: true,
            description: String::new(),
            image_url: String::new(),
        };

        assert_eq!(
            CartItem::from_medicine(&medicine, 1),
            Err(CartError::OutOfStock(MedicineId::new(7)))
        );
        assert_eq!(
            CartItem::from_medicine(&Medicine { stock: 1, ..medicine }, 1).map(|i| i.price),
            Ok(220_40)
        );
    }

    #[test]
    fn take_ordered_keeps_lines_added_after_snapshot() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 10_00, 2))?;

        let snapshot = cart.clone();

        cart.add(item(1, 10_00, 1))?;
        cart.add(item(9, 5_00, 3))?;
        cart.take_ordered(&snapshot);

        assert_eq!(cart.get(MedicineId::new(1)).map(|i| i.quantity), Some(1));
        assert_eq!(cart.get(MedicineId::new(9)).map(|i| i.quantity), Some(3));

        let remaining = cart.clone();
        cart.take_ordered(&remaining);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn prescription_flag_is_any_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 1_00, 1))?;
        assert!(!cart.requires_prescription());

        cart.add(CartItem {
            requires_prescription: true,
            ..item(2, 1_00, 1)
        })?;
        assert!(cart.requires_prescription());

        Ok(())
    }
}
