//! Carts

pub mod errors;
pub mod events;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use events::CartEvent;
pub use service::*;
