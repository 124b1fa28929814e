use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use sha2::{Digest, Sha256};

use ecomgen_core::{NUM_CUSTOMERS, NUM_ORDERS, NUM_PRODUCTS, TABLES};
use ecomgen_generate::sampling::round_cents;
use ecomgen_generate::{GenerateOptions, GenerationEngine};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

fn options(out_dir: PathBuf) -> GenerateOptions {
    GenerateOptions {
        out_dir,
        as_of: as_of(),
        ..GenerateOptions::default()
    }
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("ecomgen_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[test]
fn generate_is_deterministic() {
    let dir_a = temp_out_dir("run_a");
    let dir_b = temp_out_dir("run_b");

    GenerationEngine::new(options(dir_a.clone()))
        .run()
        .expect("run generation A");
    GenerationEngine::new(options(dir_b.clone()))
        .run()
        .expect("run generation B");

    for table in &TABLES {
        let hash_a = hash_file(&dir_a.join(table.file_name)).expect("hash file A");
        let hash_b = hash_file(&dir_b.join(table.file_name)).expect("hash file B");
        assert_eq!(hash_a, hash_b, "{} should be deterministic", table.file_name);
    }
}

#[test]
fn a_different_seed_changes_the_output() {
    let dir_a = temp_out_dir("seed_a");
    let dir_b = temp_out_dir("seed_b");

    GenerationEngine::new(options(dir_a.clone())).run().expect("run A");
    GenerationEngine::new(GenerateOptions {
        seed: 7,
        ..options(dir_b.clone())
    })
    .run()
    .expect("run B");

    let hash_a = hash_file(&dir_a.join("customers.csv")).expect("hash A");
    let hash_b = hash_file(&dir_b.join("customers.csv")).expect("hash B");
    assert_ne!(hash_a, hash_b);
}

#[test]
fn generate_respects_row_counts() {
    let out_dir = temp_out_dir("rows");
    let report = GenerationEngine::new(options(out_dir.clone()))
        .run()
        .expect("run generation");

    assert_eq!(report.rows_for("customers"), Some(NUM_CUSTOMERS));
    assert_eq!(report.rows_for("products"), Some(NUM_PRODUCTS));
    assert_eq!(report.rows_for("orders"), Some(NUM_ORDERS));
    assert_eq!(report.rows_for("payments"), Some(NUM_ORDERS));
    let items = report.rows_for("order_items").expect("order_items report");
    assert!((NUM_ORDERS..=NUM_ORDERS * 4).contains(&items), "items={items}");

    let bytes: u64 = report.tables.iter().map(|table| table.bytes).sum();
    assert_eq!(bytes, report.bytes_written);

    for table in &TABLES {
        let mut reader = csv::Reader::from_path(out_dir.join(table.file_name)).expect("open csv");
        let header: Vec<String> = reader
            .headers()
            .expect("header")
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(header, table.column_names());
        let rows = reader.records().count() as u64;
        assert_eq!(Some(rows), report.rows_for(table.name.as_str()));
    }
}

#[test]
fn rerun_overwrites_existing_files() {
    let out_dir = temp_out_dir("overwrite");
    fs::write(out_dir.join("orders.csv"), "stale\n").expect("seed stale file");

    GenerationEngine::new(options(out_dir.clone()))
        .run()
        .expect("run generation");

    let contents = fs::read_to_string(out_dir.join("orders.csv")).expect("read orders");
    assert!(contents.starts_with("order_id,customer_id,order_date,total_amount\n"));
}

#[test]
fn creates_missing_output_directory() {
    let out_dir = temp_out_dir("nested").join("data");
    GenerationEngine::new(options(out_dir.clone()))
        .run()
        .expect("run generation");
    assert!(out_dir.join("payments.csv").exists());
}

#[test]
fn orders_are_consistent_with_their_items() {
    let dataset = GenerationEngine::new(options(temp_out_dir("unused")))
        .build()
        .expect("build dataset");

    let prices: HashMap<u64, f64> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product.price))
        .collect();

    let mut items_by_order: HashMap<u64, Vec<f64>> = HashMap::new();
    for item in &dataset.order_items {
        let price = prices
            .get(&item.product_id)
            .unwrap_or_else(|| panic!("item {} references a missing product", item.order_item_id));
        assert!((1..=3).contains(&item.quantity));
        assert_eq!(item.subtotal, round_cents(price * item.quantity as f64));
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(item.subtotal);
    }

    let customers: HashSet<u64> = dataset
        .customers
        .iter()
        .map(|customer| customer.customer_id)
        .collect();

    assert_eq!(dataset.orders.len(), dataset.charges.len());
    for (order, charges) in dataset.orders.iter().zip(&dataset.charges) {
        assert_eq!(order.order_id, charges.order_id);
        assert!(customers.contains(&order.customer_id));

        let subtotals = items_by_order
            .get(&order.order_id)
            .unwrap_or_else(|| panic!("order {} has no items", order.order_id));
        assert!((1..=4).contains(&subtotals.len()));

        assert!((0.0..=15.0).contains(&charges.shipping));
        assert!(charges.discount >= 0.0);
        let subtotal_sum: f64 = subtotals.iter().sum();
        assert_eq!(
            order.total_amount,
            round_cents(subtotal_sum + charges.shipping - charges.discount),
            "order {}",
            order.order_id
        );
    }
    assert_eq!(items_by_order.len(), dataset.orders.len());
}

#[test]
fn every_order_has_exactly_one_payment_within_a_week() {
    let dataset = GenerationEngine::new(options(temp_out_dir("unused")))
        .build()
        .expect("build dataset");

    let order_dates: HashMap<u64, NaiveDate> = dataset
        .orders
        .iter()
        .map(|order| (order.order_id, order.order_date))
        .collect();

    let mut paid_orders = HashSet::new();
    for payment in &dataset.payments {
        assert_eq!(payment.payment_id, payment.order_id);
        assert!(paid_orders.insert(payment.order_id), "duplicate payment");
        let order_date = order_dates
            .get(&payment.order_id)
            .expect("payment references an order");
        assert!(payment.payment_date >= *order_date);
        assert!(payment.payment_date <= *order_date + Duration::days(7));
    }
    assert_eq!(paid_orders.len(), dataset.orders.len());
}

#[test]
fn customers_have_unique_emails_and_recent_signups() {
    let dataset = GenerationEngine::new(options(temp_out_dir("unused")))
        .build()
        .expect("build dataset");

    let earliest_signup = NaiveDate::from_ymd_opt(2023, 10, 19).expect("date");
    let earliest_order = NaiveDate::from_ymd_opt(2024, 10, 19).expect("date");

    let emails: HashSet<&str> = dataset
        .customers
        .iter()
        .map(|customer| customer.email.as_str())
        .collect();
    assert_eq!(emails.len(), dataset.customers.len());

    for (index, customer) in dataset.customers.iter().enumerate() {
        assert_eq!(customer.customer_id, index as u64 + 1);
        assert!(customer.signup_date >= earliest_signup && customer.signup_date <= as_of());
    }
    for order in &dataset.orders {
        assert!(order.order_date >= earliest_order && order.order_date <= as_of());
    }
    for product in &dataset.products {
        assert!((5.0..=500.0).contains(&product.price));
        assert_eq!(product.price, round_cents(product.price));
    }
}
