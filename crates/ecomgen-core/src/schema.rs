use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The five tables of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    Customers,
    Products,
    Orders,
    OrderItems,
    Payments,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Customers => "customers",
            TableName::Products => "products",
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
            TableName::Payments => "payments",
        }
    }

    /// Static definition of this table.
    pub fn spec(&self) -> &'static TableSpec {
        match self {
            TableName::Customers => &TABLES[0],
            TableName::Products => &TABLES[1],
            TableName::Orders => &TABLES[2],
            TableName::OrderItems => &TABLES[3],
            TableName::Payments => &TABLES[4],
        }
    }

    /// CSV file name holding this table.
    pub fn file_name(&self) -> &'static str {
        self.spec().file_name
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        TABLES
            .iter()
            .map(|table| table.name)
            .find(|name| name.as_str() == value)
            .ok_or_else(|| Error::UnknownTable(value.to_string()))
    }
}

/// SQLite storage affinity of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Real,
    Text,
}

impl Affinity {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Affinity::Integer => "INTEGER",
            Affinity::Real => "REAL",
            Affinity::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub affinity: Affinity,
}

/// Single-column foreign key.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeySpec {
    pub column: &'static str,
    pub referenced_table: TableName,
    pub referenced_column: &'static str,
}

/// Static table definition shared by the generator and the loader.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: TableName,
    pub file_name: &'static str,
    pub columns: &'static [ColumnSpec],
    pub primary_key: &'static str,
    pub foreign_keys: &'static [ForeignKeySpec],
}

const fn col(name: &'static str, affinity: Affinity) -> ColumnSpec {
    ColumnSpec { name, affinity }
}

const fn fk(
    column: &'static str,
    referenced_table: TableName,
    referenced_column: &'static str,
) -> ForeignKeySpec {
    ForeignKeySpec {
        column,
        referenced_table,
        referenced_column,
    }
}

/// All tables, parents before children.
pub static TABLES: [TableSpec; 5] = [
    TableSpec {
        name: TableName::Customers,
        file_name: "customers.csv",
        columns: &[
            col("customer_id", Affinity::Integer),
            col("name", Affinity::Text),
            col("email", Affinity::Text),
            col("phone", Affinity::Text),
            col("signup_date", Affinity::Text),
        ],
        primary_key: "customer_id",
        foreign_keys: &[],
    },
    TableSpec {
        name: TableName::Products,
        file_name: "products.csv",
        columns: &[
            col("product_id", Affinity::Integer),
            col("product_name", Affinity::Text),
            col("category", Affinity::Text),
            col("price", Affinity::Real),
        ],
        primary_key: "product_id",
        foreign_keys: &[],
    },
    TableSpec {
        name: TableName::Orders,
        file_name: "orders.csv",
        columns: &[
            col("order_id", Affinity::Integer),
            col("customer_id", Affinity::Integer),
            col("order_date", Affinity::Text),
            col("total_amount", Affinity::Real),
        ],
        primary_key: "order_id",
        foreign_keys: &[fk("customer_id", TableName::Customers, "customer_id")],
    },
    TableSpec {
        name: TableName::OrderItems,
        file_name: "order_items.csv",
        columns: &[
            col("order_item_id", Affinity::Integer),
            col("order_id", Affinity::Integer),
            col("product_id", Affinity::Integer),
            col("quantity", Affinity::Integer),
            col("subtotal", Affinity::Real),
        ],
        primary_key: "order_item_id",
        foreign_keys: &[
            fk("order_id", TableName::Orders, "order_id"),
            fk("product_id", TableName::Products, "product_id"),
        ],
    },
    TableSpec {
        name: TableName::Payments,
        file_name: "payments.csv",
        columns: &[
            col("payment_id", Affinity::Integer),
            col("order_id", Affinity::Integer),
            col("payment_method", Affinity::Text),
            col("payment_status", Affinity::Text),
            col("payment_date", Affinity::Text),
        ],
        primary_key: "payment_id",
        foreign_keys: &[fk("order_id", TableName::Orders, "order_id")],
    },
];

impl TableSpec {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Idempotent DDL for this table.
    pub fn create_table_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                if column.name == self.primary_key {
                    format!("    {} {} PRIMARY KEY", column.name, column.affinity.as_sql())
                } else {
                    format!("    {} {}", column.name, column.affinity.as_sql())
                }
            })
            .collect();
        for foreign_key in self.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY ({}) REFERENCES {}({})",
                foreign_key.column, foreign_key.referenced_table, foreign_key.referenced_column
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
            self.name,
            lines.join(",\n")
        )
    }

    /// Parameterized insert covering every column in order.
    pub fn insert_sql(&self) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            self.column_names().join(", "),
            placeholders
        )
    }

    /// Reject a CSV header that does not match the column list exactly.
    pub fn check_header<S: AsRef<str>>(&self, header: &[S]) -> Result<()> {
        let expected = self.column_names();
        let found: Vec<&str> = header.iter().map(|value| value.as_ref()).collect();
        if found != expected {
            return Err(Error::InvalidSchema(format!(
                "{}: expected columns [{}], found [{}]",
                self.file_name,
                expected.join(", "),
                found.join(", ")
            )));
        }
        Ok(())
    }
}

/// DDL for the whole dataset, parents first.
pub fn create_schema_sql() -> String {
    TABLES
        .iter()
        .map(TableSpec::create_table_sql)
        .collect::<Vec<_>>()
        .join("\n\n")
}
