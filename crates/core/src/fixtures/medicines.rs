//! Medicine Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;

use crate::{fixtures::FixtureError, medicines::NewMedicine, pricing::CURRENCY};

/// Medicine Fixture
#[derive(Debug, Deserialize)]
pub struct MedicineFixture {
    /// Medicine name
    pub name: String,

    /// Generic (salt) name
    pub generic_name: String,

    /// Manufacturer brand
    pub brand: String,

    /// Catalog category
    pub category: String,

    /// Price (e.g., "45.50 INR")
    pub price: String,

    /// Units in stock
    pub stock: u32,

    /// Whether a prescription is needed to order it
    #[serde(default)]
    pub requires_prescription: bool,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Product image
    #[serde(default)]
    pub image_url: String,
}

impl TryFrom<MedicineFixture> for NewMedicine {
    type Error = FixtureError;

    fn try_from(fixture: MedicineFixture) -> Result<Self, Self::Error> {
        Ok(NewMedicine {
            price: parse_price(&fixture.price)?,
            name: fixture.name,
            generic_name: fixture.generic_name,
            brand: fixture.brand,
            category: fixture.category,
            stock: fixture.stock,
            requires_prescription: fixture.requires_prescription,
            description: fixture.description,
            image_url: fixture.image_url,
        })
    }
}

/// Parse price string (e.g., "45.50 INR") into paise.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency is not
/// the store currency.
pub fn parse_price(s: &str) -> Result<u64, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    if !currency_code.eq_ignore_ascii_case(CURRENCY.iso_alpha_code) {
        return Err(FixtureError::UnknownCurrency((*currency_code).to_string()));
    }

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_u64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_converts_to_paise() -> TestResult {
        assert_eq!(parse_price("45.50 INR")?, 45_50);
        assert_eq!(parse_price("120 INR")?, 120_00);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("45.50INR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 GBP");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "GBP"));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        assert!(matches!(
            parse_price("-1.00 INR"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn fixture_converts_into_new_medicine() -> TestResult {
        let medicine = NewMedicine::try_from(MedicineFixture {
            name: "Azithral 500".to_string(),
            generic_name: "Azithromycin".to_string(),
            brand: "Alembic".to_string(),
            category: "Antibiotics".to_string(),
            price: "119.50 INR".to_string(),
            stock: 45,
            requires_prescription: true,
            description: String::new(),
            image_url: String::new(),
        })?;

        assert_eq!(medicine.price, 119_50);
        assert!(medicine.requires_prescription);

        Ok(())
    }
}
