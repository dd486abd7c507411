//! Medicines service errors.

use medistore::{
    ids::IdError,
    medicines::{CatalogError, MedicineId},
};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum MedicinesServiceError {
    #[error("medicine {0} not found")]
    NotFound(MedicineId),

    #[error("invalid data")]
    InvalidData(#[source] CatalogError),

    #[error("no medicine ids left to assign")]
    IdsExhausted(#[source] IdError),

    #[error("storage error")]
    Storage(#[from] StorageError),
}

impl MedicinesServiceError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(error) if error.is_transient())
    }
}

impl From<CatalogError> for MedicinesServiceError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound(id) => Self::NotFound(id),
            CatalogError::Id(source) => Self::IdsExhausted(source),
            CatalogError::BlankName => Self::InvalidData(error),
        }
    }
}
