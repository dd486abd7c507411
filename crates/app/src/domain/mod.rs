//! Medistore Domain Concerns

pub mod carts;
pub mod checkout;
pub mod medicines;
pub mod orders;
