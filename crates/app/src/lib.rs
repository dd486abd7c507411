//! Storage-backed storefront services, checkout orchestration and shared
//! configuration for the `medistore` binary.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod storage;

pub use domain::{carts, checkout, medicines, orders};

#[cfg(test)]
mod test;
