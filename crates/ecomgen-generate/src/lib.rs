//! Deterministic synthetic data generation for the ecomgen dataset.
//!
//! The engine builds customers, products, orders, order items and payments
//! from a seed and fixed counts, then writes them as CSV files.

pub mod engine;
pub mod errors;
pub mod faker;
pub mod model;
pub mod output;
pub mod sampling;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{Dataset, GenerateOptions, GenerationReport, OrderCharges, TableReport};
