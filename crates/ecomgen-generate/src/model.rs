use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use ecomgen_core::{
    Customer, NUM_CUSTOMERS, NUM_ORDERS, NUM_PRODUCTS, Order, OrderItem, Payment, Product, SEED,
};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Directory where the CSV files are written.
    pub out_dir: PathBuf,
    pub seed: u64,
    pub num_customers: u64,
    pub num_products: u64,
    pub num_orders: u64,
    /// Reference "today" for every date window.
    pub as_of: NaiveDate,
    /// Maximum draws for a value that must be unique.
    pub max_attempts_unique: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: SEED,
            num_customers: NUM_CUSTOMERS,
            num_products: NUM_PRODUCTS,
            num_orders: NUM_ORDERS,
            as_of: chrono::Local::now().date_naive(),
            max_attempts_unique: 50,
        }
    }
}

/// Charges applied on top of an order's item subtotals. Kept in memory only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderCharges {
    pub order_id: u64,
    pub shipping: f64,
    pub discount: f64,
}

/// Fully generated dataset, before it touches disk.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
    pub charges: Vec<OrderCharges>,
}

/// Summary of a written table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: String,
    pub file: String,
    pub path: PathBuf,
    pub rows: u64,
    pub bytes: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub as_of: NaiveDate,
    pub out_dir: PathBuf,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(options: &GenerateOptions) -> Self {
        Self {
            seed: options.seed,
            as_of: options.as_of,
            out_dir: options.out_dir.clone(),
            tables: Vec::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn rows_for(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|report| report.table == table)
            .map(|report| report.rows)
    }
}
