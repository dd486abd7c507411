//! Delivery Address

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of an Indian postal index number.
pub const PINCODE_LENGTH: usize = 6;

/// Address validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// A required field is empty or whitespace.
    #[error("delivery address is missing {0}")]
    MissingField(&'static str),

    /// Pincodes are six ASCII digits.
    #[error("invalid pincode: {0:?}")]
    InvalidPincode(String),
}

/// Delivery Address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// House and street.
    pub street: String,
    /// City or town.
    pub city: String,
    /// State or union territory.
    pub state: String,
    /// Six digit postal index number.
    pub pincode: String,
}

impl DeliveryAddress {
    /// Check every field is filled in and the pincode is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`AddressError`] found, checking fields in display order.
    pub fn validate(&self) -> Result<(), AddressError> {
        for (field, value) in [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
        ] {
            if value.trim().is_empty() {
                return Err(AddressError::MissingField(field));
            }
        }

        let pincode = self.pincode.trim();

        if pincode.len() != PINCODE_LENGTH || !pincode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidPincode(self.pincode.clone()));
        }

        Ok(())
    }
}

impl Display for DeliveryAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}, {}, {} - {}",
            self.street, self.city, self.state, self.pincode
        )
    }
}
