//! Fixtures
//!
//! YAML seed data for the catalog. Prices are written as `"45.50 INR"`.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::medicines::NewMedicine;

pub mod medicines;

pub use medicines::{MedicineFixture, parse_price};

/// Catalog shipped with the crate.
pub const DEFAULT_CATALOG: &str = include_str!("../../fixtures/catalog.yaml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Wrapper for medicines in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Medicines in catalog order
    pub medicines: Vec<MedicineFixture>,
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the document does not match the fixture shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read, or
    /// [`FixtureError::Yaml`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the bundled fixture is malformed.
    pub fn bundled() -> Result<Self, FixtureError> {
        Self::from_yaml(DEFAULT_CATALOG)
    }

    /// Convert every fixture into new medicine data, in order.
    ///
    /// # Errors
    ///
    /// Returns the first price error encountered.
    pub fn into_new_medicines(self) -> Result<Vec<NewMedicine>, FixtureError> {
        self.medicines
            .into_iter()
            .map(NewMedicine::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_catalog_parses() -> TestResult {
        let medicines = CatalogFixture::bundled()?.into_new_medicines()?;

        assert!(
            medicines.len() > 6,
            "bundled catalog should fill the featured row"
        );
        assert!(medicines.iter().any(|m| m.requires_prescription));
        assert!(medicines.iter().any(|m| !m.requires_prescription));

        Ok(())
    }

    #[test]
    fn missing_fields_are_yaml_errors() {
        let result = CatalogFixture::from_yaml("medicines:\n  - name: Only a name\n");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yaml");

        std::fs::write(
            &path,
            "medicines:\n  - name: Dolo 650\n    generic_name: Paracetamol\n    brand: Micro Labs\n    category: Pain Relief\n    price: \"32.00 INR\"\n    stock: 12\n",
        )?;

        let fixture = CatalogFixture::from_path(&path)?;

        assert_eq!(fixture.medicines.len(), 1);

        Ok(())
    }
}
