//! Medistore
//!
//! Domain model for a medicine storefront: the medicine catalog, per-user
//! shopping carts and the order workflow that turns a cart into an order
//! and walks it through prescription verification to delivery.
//!
//! Everything here is synchronous and storage agnostic. Each store is a plain
//! serde document ([`medicines::Catalog`], [`cart::Cart`], [`orders::OrderBook`])
//! mutated in memory; persistence and concurrency live in `medistore-app`.

pub mod address;
pub mod cart;
pub mod fixtures;
pub mod ids;
pub mod medicines;
pub mod orders;
pub mod pricing;
