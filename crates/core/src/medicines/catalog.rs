//! Catalog
//!
//! The catalog document: every medicine in catalog order plus the highest id
//! ever handed out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::{IdError, IdPolicy},
    medicines::{
        FEATURED_COUNT, LOW_STOCK_THRESHOLD, Medicine, MedicineId, MedicinePatch, NewMedicine,
    },
};

/// Errors raised by catalog mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No medicine carries the given id.
    #[error("medicine {0} not found")]
    NotFound(MedicineId),

    /// Medicines must have a non-blank name.
    #[error("medicine name must not be blank")]
    BlankName,

    /// No id left to assign.
    #[error(transparent)]
    Id(#[from] IdError),
}

/// Catalog Document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    last_id: u64,
    medicines: Vec<Medicine>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every medicine in catalog order.
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    /// Number of medicines.
    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    /// Whether the catalog holds no medicines.
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Look up a medicine by id.
    pub fn get(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|medicine| medicine.id == id)
    }

    /// Case-insensitive substring search over name, generic name and brand.
    ///
    /// A blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<Medicine> {
        if query.trim().is_empty() {
            return self.medicines.clone();
        }

        let query = query.to_lowercase();

        self.medicines
            .iter()
            .filter(|medicine| medicine.matches(&query))
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match on category; a blank category returns the whole catalog.
    pub fn filter_by_category(&self, category: &str) -> Vec<Medicine> {
        let category = category.trim().to_lowercase();

        if category.is_empty() {
            return self.medicines.clone();
        }

        self.medicines
            .iter()
            .filter(|medicine| medicine.category.to_lowercase() == category)
            .cloned()
            .collect()
    }

    /// The first [`FEATURED_COUNT`] medicines.
    pub fn featured(&self) -> Vec<Medicine> {
        self.medicines.iter().take(FEATURED_COUNT).cloned().collect()
    }

    /// Medicines with fewer than [`LOW_STOCK_THRESHOLD`] units, out-of-stock included.
    pub fn low_stock(&self) -> Vec<Medicine> {
        self.medicines
            .iter()
            .filter(|medicine| medicine.stock < LOW_STOCK_THRESHOLD)
            .cloned()
            .collect()
    }

    /// Assign an id to `medicine` and append it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] for a blank name and
    /// [`CatalogError::Id`] when no id is left.
    pub fn create(
        &mut self,
        medicine: NewMedicine,
        policy: IdPolicy,
    ) -> Result<Medicine, CatalogError> {
        if medicine.name.trim().is_empty() {
            return Err(CatalogError::BlankName);
        }

        let id = policy.next_id(
            self.last_id,
            self.medicines.iter().map(|medicine| medicine.id.get()),
        )?;

        let created = medicine.into_medicine(MedicineId::new(id));

        self.last_id = self.last_id.max(id);
        self.medicines.push(created.clone());

        Ok(created)
    }

    /// Shallow-merge `patch` into the medicine with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown and
    /// [`CatalogError::BlankName`] if the patch blanks the name.
    pub fn update(
        &mut self,
        id: MedicineId,
        patch: MedicinePatch,
    ) -> Result<Medicine, CatalogError> {
        if patch
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(CatalogError::BlankName);
        }

        let medicine = self.get_mut(id)?;

        medicine.apply(patch);

        Ok(medicine.clone())
    }

    /// Replace the stock count of a medicine.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    pub fn update_stock(&mut self, id: MedicineId, stock: u32) -> Result<Medicine, CatalogError> {
        let medicine = self.get_mut(id)?;

        medicine.stock = stock;

        Ok(medicine.clone())
    }

    /// Remove a medicine and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    pub fn delete(&mut self, id: MedicineId) -> Result<Medicine, CatalogError> {
        let index = self
            .medicines
            .iter()
            .position(|medicine| medicine.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        Ok(self.medicines.remove(index))
    }

    fn get_mut(&mut self, id: MedicineId) -> Result<&mut Medicine, CatalogError> {
        self.medicines
            .iter_mut()
            .find(|medicine| medicine.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}
