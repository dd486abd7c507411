//! Medicines

pub mod errors;
mod repository;
pub mod service;

pub use errors::MedicinesServiceError;
pub use service::*;
