//! Core contracts for the ecomgen pipeline.
//!
//! This crate defines the entity records, the static table schema shared by
//! the generator and the loader, and the fixed pipeline configuration.

pub mod config;
pub mod error;
pub mod model;
pub mod schema;

pub use config::{NUM_CUSTOMERS, NUM_ORDERS, NUM_PRODUCTS, ProjectPaths, SEED, csv_path};
pub use error::{Error, Result};
pub use model::{Category, Customer, Order, OrderItem, Payment, PaymentMethod, PaymentStatus, Product};
pub use schema::{Affinity, ColumnSpec, ForeignKeySpec, TABLES, TableName, TableSpec, create_schema_sql};
