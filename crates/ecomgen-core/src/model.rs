use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub signup_date: NaiveDate,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: u64,
    pub product_name: String,
    pub category: Category,
    pub price: f64,
}

/// An order header. `total_amount` is derived from its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub customer_id: u64,
    pub order_date: NaiveDate,
    pub total_amount: f64,
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub subtotal: f64,
}

/// The payment attached to an order. `payment_id` equals `order_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: u64,
    pub order_id: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: NaiveDate,
}

/// Product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Books,
    Electronics,
    Home,
    Toys,
    Clothing,
    Sports,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Books,
        Category::Electronics,
        Category::Home,
        Category::Toys,
        Category::Clothing,
        Category::Sports,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
    ApplePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
        PaymentMethod::ApplePay,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Paid,
        PaymentStatus::Pending,
        PaymentStatus::Failed,
    ];
}
