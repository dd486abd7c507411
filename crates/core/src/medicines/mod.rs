//! Medicines

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

pub mod catalog;

pub use catalog::{Catalog, CatalogError};

/// Medicine Id
pub type MedicineId = TypedId<Medicine>;

/// Stock below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Number of catalog entries shown as featured.
pub const FEATURED_COUNT: usize = 6;

/// Medicine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Catalog id.
    pub id: MedicineId,
    /// Display name.
    pub name: String,
    /// Active ingredient.
    pub generic_name: String,
    /// Manufacturer.
    pub brand: String,
    /// Shelf category.
    pub category: String,
    /// Unit price in paise.
    pub price: u64,
    /// Units on hand.
    pub stock: u32,
    /// Whether ordering needs a prescription.
    pub requires_prescription: bool,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Product image path.
    #[serde(default)]
    pub image_url: String,
}

impl Medicine {
    /// Stock band shown next to the medicine.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Whether `query` (already lowercased) appears in the name, generic name or brand.
    fn matches(&self, query: &str) -> bool {
        [&self.name, &self.generic_name, &self.brand]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }

    fn apply(&mut self, patch: MedicinePatch) {
        let MedicinePatch {
            name,
            generic_name,
            brand,
            category,
            price,
            stock,
            requires_prescription,
            description,
            image_url,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(generic_name) = generic_name {
            self.generic_name = generic_name;
        }
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(requires_prescription) = requires_prescription {
            self.requires_prescription = requires_prescription;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(image_url) = image_url {
            self.image_url = image_url;
        }
    }
}

/// New Medicine Data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    /// Display name.
    pub name: String,
    /// Active ingredient.
    pub generic_name: String,
    /// Manufacturer.
    pub brand: String,
    /// Shelf category.
    pub category: String,
    /// Unit price in paise.
    pub price: u64,
    /// Units on hand.
    pub stock: u32,
    /// Whether ordering needs a prescription.
    pub requires_prescription: bool,
    /// Short description.
    pub description: String,
    /// Product image path.
    pub image_url: String,
}

impl NewMedicine {
    fn into_medicine(self, id: MedicineId) -> Medicine {
        Medicine {
            id,
            name: self.name,
            generic_name: self.generic_name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            stock: self.stock,
            requires_prescription: self.requires_prescription,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// Medicine Update Data
///
/// Only the fields that are `Some` are written; the id can never be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicinePatch {
    /// New display name.
    pub name: Option<String>,
    /// New active ingredient.
    pub generic_name: Option<String>,
    /// New manufacturer.
    pub brand: Option<String>,
    /// New shelf category.
    pub category: Option<String>,
    /// New unit price in paise.
    pub price: Option<u64>,
    /// New stock count.
    pub stock: Option<u32>,
    /// New prescription flag.
    pub requires_prescription: Option<bool>,
    /// New description.
    pub description: Option<String>,
    /// New image path.
    pub image_url: Option<String>,
}

/// Stock band for a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    /// Nothing left to sell.
    OutOfStock,

    /// Fewer than [`LOW_STOCK_THRESHOLD`] units left.
    Low,

    /// At least [`LOW_STOCK_THRESHOLD`] units.
    InStock,
}

impl StockLevel {
    /// Classify a stock count.
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            s if s < LOW_STOCK_THRESHOLD => Self::Low,
            _ => Self::InStock,
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::Low => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_level_bands() {
        assert_eq!(StockLevel::from_stock(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::from_stock(1), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(9), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(10), StockLevel::InStock);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut medicine = NewMedicine {
            name: "Dolo 650".to_string(),
            generic_name: "Paracetamol".to_string(),
            brand: "Micro Labs".to_string(),
            category: "Pain Relief".to_string(),
            price: 30_00,
            stock: 40,
            ..NewMedicine::default()
        }
        .into_medicine(MedicineId::new(7));

        medicine.apply(MedicinePatch {
            price: Some(32_50),
            requires_prescription: Some(true),
            ..MedicinePatch::default()
        });

        assert_eq!(medicine.id, MedicineId::new(7));
        assert_eq!(medicine.name, "Dolo 650");
        assert_eq!(medicine.price, 32_50);
        assert_eq!(medicine.stock, 40);
        assert!(medicine.requires_prescription);
    }
}
