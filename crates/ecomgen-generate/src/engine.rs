use std::path::Path;
use std::time::Instant;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use ecomgen_core::{
    Category, Customer, Order, OrderItem, Payment, PaymentMethod, PaymentStatus, Product,
    TableName, csv_path,
};

use crate::errors::GenerationError;
use crate::faker::{FakeAdapter, UniqueEmails};
use crate::model::{Dataset, GenerateOptions, GenerationReport, OrderCharges, TableReport};
use crate::output::write_table_csv;
use crate::sampling::{WeightedChoice, date_between, hash_seed, round_cents, years_before};

const SIGNUP_WINDOW_YEARS: u32 = 3;
const ORDER_WINDOW_YEARS: u32 = 2;
const MIN_PRICE: f64 = 5.0;
const MAX_PRICE: f64 = 500.0;
const MAX_SHIPPING: f64 = 15.0;
const DISCOUNT_PROBABILITY: f64 = 0.1;
const MIN_DISCOUNT_RATE: f64 = 0.03;
const MAX_DISCOUNT_RATE: f64 = 0.15;
const MAX_PAYMENT_DELAY_DAYS: i64 = 7;

const ITEM_COUNTS: [u32; 4] = [1, 2, 3, 4];
const ITEM_COUNT_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
const QUANTITIES: [u32; 3] = [1, 2, 3];
const QUANTITY_WEIGHTS: [f64; 3] = [0.7, 0.25, 0.05];
const PAYMENT_STATUS_WEIGHTS: [f64; 3] = [0.85, 0.10, 0.05];

/// Entry point for generating the dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Build every table in memory. Same options, same dataset.
    pub fn build(&self) -> Result<Dataset, GenerationError> {
        let options = &self.options;
        if options.num_orders > 0 && (options.num_customers == 0 || options.num_products == 0) {
            return Err(GenerationError::InvalidOptions(
                "orders need at least one customer and one product".to_string(),
            ));
        }

        let customers = generate_customers(options)?;
        let products = generate_products(options);
        let mut dataset = Dataset {
            customers,
            products,
            ..Dataset::default()
        };
        generate_sales(options, &mut dataset)?;
        Ok(dataset)
    }

    /// Build the dataset and write one CSV per table into `out_dir`.
    pub fn run(&self) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let out_dir = &self.options.out_dir;

        info!(
            seed = self.options.seed,
            as_of = %self.options.as_of,
            customers = self.options.num_customers,
            products = self.options.num_products,
            orders = self.options.num_orders,
            "generation started"
        );

        let dataset = self.build()?;
        std::fs::create_dir_all(out_dir)?;

        let mut report = GenerationReport::new(&self.options);
        write_table(out_dir, TableName::Customers, &dataset.customers, &mut report)?;
        write_table(out_dir, TableName::Products, &dataset.products, &mut report)?;
        write_table(out_dir, TableName::Orders, &dataset.orders, &mut report)?;
        write_table(out_dir, TableName::OrderItems, &dataset.order_items, &mut report)?;
        write_table(out_dir, TableName::Payments, &dataset.payments, &mut report)?;

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(report)
    }
}

fn write_table<T: Serialize>(
    out_dir: &Path,
    table: TableName,
    records: &[T],
    report: &mut GenerationReport,
) -> Result<(), GenerationError> {
    let path = csv_path(out_dir, table);
    let bytes = write_table_csv(&path, table.spec(), records)?;
    info!(table = %table, rows = records.len(), bytes, path = %path.display(), "table generated");

    report.bytes_written += bytes;
    report.tables.push(TableReport {
        table: table.to_string(),
        file: table.file_name().to_string(),
        path,
        rows: records.len() as u64,
        bytes,
    });
    Ok(())
}

fn stream_rng(seed: u64, stream: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, stream))
}

fn generate_customers(options: &GenerateOptions) -> Result<Vec<Customer>, GenerationError> {
    let mut rng = stream_rng(options.seed, TableName::Customers.as_str());
    let mut emails = UniqueEmails::new(options.max_attempts_unique);
    let window_start = years_before(options.as_of, SIGNUP_WINDOW_YEARS);

    let mut customers = Vec::with_capacity(options.num_customers as usize);
    for customer_id in 1..=options.num_customers {
        let name = FakeAdapter::person_name(&mut rng);
        let email = emails.next(&mut rng)?;
        let phone = FakeAdapter::phone(&mut rng);
        let signup_date = date_between(&mut rng, window_start, options.as_of);
        customers.push(Customer {
            customer_id,
            name,
            email,
            phone,
            signup_date,
        });
    }
    Ok(customers)
}

fn generate_products(options: &GenerateOptions) -> Vec<Product> {
    let mut rng = stream_rng(options.seed, TableName::Products.as_str());

    (1..=options.num_products)
        .map(|product_id| {
            let product_name = FakeAdapter::product_name(&mut rng);
            let category = *Category::ALL.choose(&mut rng).unwrap_or(&Category::Books);
            let price = round_cents(rng.random_range(MIN_PRICE..=MAX_PRICE));
            Product {
                product_id,
                product_name,
                category,
                price,
            }
        })
        .collect()
}

/// Orders, their items and payments come from one stream since each order
/// draws all three together.
fn generate_sales(options: &GenerateOptions, dataset: &mut Dataset) -> Result<(), GenerationError> {
    let mut rng = stream_rng(options.seed, TableName::Orders.as_str());
    let item_counts = WeightedChoice::new(&ITEM_COUNTS, &ITEM_COUNT_WEIGHTS)?;
    let quantities = WeightedChoice::new(&QUANTITIES, &QUANTITY_WEIGHTS)?;
    let statuses = WeightedChoice::new(&PaymentStatus::ALL, &PAYMENT_STATUS_WEIGHTS)?;
    let window_start = years_before(options.as_of, ORDER_WINDOW_YEARS);
    let products = &dataset.products;

    let mut orders = Vec::with_capacity(options.num_orders as usize);
    let mut order_items = Vec::new();
    let mut payments = Vec::with_capacity(options.num_orders as usize);
    let mut charges = Vec::with_capacity(options.num_orders as usize);
    let mut next_item_id = 1_u64;

    for order_id in 1..=options.num_orders {
        let customer_id = rng.random_range(1..=options.num_customers);
        let order_date = date_between(&mut rng, window_start, options.as_of);
        let item_count = item_counts.sample(&mut rng);

        // Subtotals are rounded one by one before they are summed.
        let mut subtotal_sum = 0.0;
        for _ in 0..item_count {
            let product = &products[rng.random_range(0..products.len())];
            let quantity = quantities.sample(&mut rng);
            let subtotal = round_cents(product.price * quantity as f64);
            subtotal_sum += subtotal;
            order_items.push(OrderItem {
                order_item_id: next_item_id,
                order_id,
                product_id: product.product_id,
                quantity,
                subtotal,
            });
            next_item_id += 1;
        }

        let shipping = round_cents(rng.random_range(0.0..=MAX_SHIPPING));
        let discount = if rng.random_bool(DISCOUNT_PROBABILITY) {
            round_cents(subtotal_sum * rng.random_range(MIN_DISCOUNT_RATE..=MAX_DISCOUNT_RATE))
        } else {
            0.0
        };
        let total_amount = round_cents(subtotal_sum + shipping - discount);

        orders.push(Order {
            order_id,
            customer_id,
            order_date,
            total_amount,
        });
        charges.push(OrderCharges {
            order_id,
            shipping,
            discount,
        });

        let payment_method = *PaymentMethod::ALL
            .choose(&mut rng)
            .unwrap_or(&PaymentMethod::CreditCard);
        let payment_status = statuses.sample(&mut rng);
        let delay = rng.random_range(0..=MAX_PAYMENT_DELAY_DAYS);
        payments.push(Payment {
            payment_id: order_id,
            order_id,
            payment_method,
            payment_status,
            payment_date: order_date + chrono::Duration::days(delay),
        });
    }

    dataset.orders = orders;
    dataset.order_items = order_items;
    dataset.payments = payments;
    dataset.charges = charges;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn options(orders: u64) -> GenerateOptions {
        GenerateOptions {
            num_customers: 10,
            num_products: 5,
            num_orders: orders,
            as_of: NaiveDate::from_ymd_opt(2025, 6, 30).expect("date"),
            ..GenerateOptions::default()
        }
    }

    #[test]
    fn orders_require_customers_and_products() {
        let engine = GenerationEngine::new(GenerateOptions {
            num_products: 0,
            ..options(3)
        });
        assert!(matches!(engine.build(), Err(GenerationError::InvalidOptions(_))));
    }

    #[test]
    fn zero_orders_is_a_valid_dataset() {
        let dataset = GenerationEngine::new(options(0)).build().expect("build");
        assert_eq!(dataset.customers.len(), 10);
        assert!(dataset.orders.is_empty());
        assert!(dataset.order_items.is_empty());
        assert!(dataset.payments.is_empty());
    }

    #[test]
    fn customer_stream_ignores_order_count() {
        let few = GenerationEngine::new(options(2)).build().expect("build");
        let many = GenerationEngine::new(options(40)).build().expect("build");
        assert_eq!(few.customers, many.customers);
        assert_eq!(few.products, many.products);
    }

    #[test]
    fn item_ids_are_sequential_across_orders() {
        let dataset = GenerationEngine::new(options(25)).build().expect("build");
        for (index, item) in dataset.order_items.iter().enumerate() {
            assert_eq!(item.order_item_id, index as u64 + 1);
        }
    }
}
