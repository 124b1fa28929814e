use std::path::Path;

use ecomgen_core::{Affinity, TableSpec};

use crate::errors::LoadError;

/// A CSV field converted to the storage class of its column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    fn parse(field: &str, affinity: Affinity) -> Option<SqlValue> {
        if field.is_empty() {
            return Some(SqlValue::Null);
        }
        match affinity {
            Affinity::Integer => field.parse().ok().map(SqlValue::Integer),
            Affinity::Real => field.parse().ok().map(SqlValue::Real),
            Affinity::Text => Some(SqlValue::Text(field.to_string())),
        }
    }
}

/// Read a whole table file into memory, checking its header first.
pub fn read_table_csv(table: &TableSpec, path: &Path) -> Result<Vec<Vec<SqlValue>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    table.check_header(&header)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let mut row = Vec::with_capacity(table.columns.len());
        for (column, field) in table.columns.iter().zip(record.iter()) {
            let value =
                SqlValue::parse(field, column.affinity).ok_or_else(|| LoadError::InvalidValue {
                    file: table.file_name,
                    column: column.name,
                    line,
                    value: field.to_string(),
                })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use ecomgen_core::TableName;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ecomgen_reader_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write csv");
        path
    }

    #[test]
    fn parses_values_by_column_affinity() {
        let path = write_temp(
            "products.csv",
            "product_id,product_name,category,price\n1,Quiet Lamp,Home,19.99\n2,,Toys,\n",
        );
        let rows = read_table_csv(TableName::Products.spec(), &path).expect("read csv");
        assert_eq!(
            rows,
            vec![
                vec![
                    SqlValue::Integer(1),
                    SqlValue::Text("Quiet Lamp".to_string()),
                    SqlValue::Text("Home".to_string()),
                    SqlValue::Real(19.99),
                ],
                vec![
                    SqlValue::Integer(2),
                    SqlValue::Null,
                    SqlValue::Text("Toys".to_string()),
                    SqlValue::Null,
                ],
            ]
        );
    }

    #[test]
    fn rejects_a_wrong_header() {
        let path = write_temp("products.csv", "id,name\n1,Lamp\n");
        let result = read_table_csv(TableName::Products.spec(), &path);
        assert!(matches!(result, Err(LoadError::Schema(_))));
    }

    #[test]
    fn reports_the_line_of_a_bad_value() {
        let path = write_temp(
            "orders.csv",
            "order_id,customer_id,order_date,total_amount\n1,4,2025-01-02,10.5\nx,4,2025-01-02,3\n",
        );
        match read_table_csv(TableName::Orders.spec(), &path) {
            Err(LoadError::InvalidValue { column, line, value, .. }) => {
                assert_eq!(column, "order_id");
                assert_eq!(line, 3);
                assert_eq!(value, "x");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }
}
