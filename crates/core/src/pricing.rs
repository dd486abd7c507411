//! Prices
//!
//! Amounts are held as `u64` paise and only turned into [`Money`] for display.

use std::num::TryFromIntError;

use rusty_money::{Money, iso};
use thiserror::Error;

/// Currency every catalog price is quoted in.
pub const CURRENCY: &iso::Currency = iso::INR;

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line or running total does not fit in a `u64`.
    #[error("amount overflow")]
    Overflow,

    /// The amount does not fit the signed range money formatting uses.
    #[error("amount out of range: {0}")]
    OutOfRange(#[from] TryFromIntError),
}

/// Price of `quantity` units at `price` each.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in a `u64`.
pub fn line_total(price: u64, quantity: u32) -> Result<u64, PricingError> {
    price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sum of `price × quantity` over every line.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any line or the running sum overflows.
pub fn total<I>(lines: I) -> Result<u64, PricingError>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    lines.into_iter().try_fold(0_u64, |acc, (price, quantity)| {
        acc.checked_add(line_total(price, quantity)?)
            .ok_or(PricingError::Overflow)
    })
}

/// Convert paise into rupee [`Money`].
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] for amounts above `i64::MAX`.
pub fn to_money(amount: u64) -> Result<Money<'static, iso::Currency>, PricingError> {
    Ok(Money::from_minor(i64::try_from(amount)?, CURRENCY))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn total_sums_price_times_quantity() -> TestResult {
        let amount = total([(10_00, 2), (4_50, 3)])?;

        assert_eq!(amount, 33_50);

        Ok(())
    }

    #[test]
    fn total_of_nothing_is_zero() -> TestResult {
        assert_eq!(total([])?, 0);

        Ok(())
    }

    #[test]
    fn total_reports_overflow() {
        assert_eq!(total([(u64::MAX, 2)]), Err(PricingError::Overflow));
        assert_eq!(
            total([(u64::MAX, 1), (1, 1)]),
            Err(PricingError::Overflow)
        );
    }

    #[test]
    fn to_money_uses_rupees() -> TestResult {
        assert_eq!(to_money(45_50)?, Money::from_minor(45_50, iso::INR));

        Ok(())
    }

    #[test]
    fn to_money_rejects_amounts_beyond_i64() {
        assert!(matches!(
            to_money(u64::MAX),
            Err(PricingError::OutOfRange(_))
        ));
    }
}
