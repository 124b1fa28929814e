use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};
use tracing::info;

use crate::errors::QueryError;

/// Which database to query and where the SQL text lives.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub database_path: PathBuf,
    pub query_path: PathBuf,
}

/// One decoded result cell, keyed by its SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Real(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("NULL"),
            CellValue::Integer(value) => write!(f, "{value}"),
            // Debug keeps the decimal point on whole numbers.
            CellValue::Real(value) => write!(f, "{value:?}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Blob(value) => write!(f, "<{} bytes>", value.len()),
        }
    }
}

/// Fully materialized result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl QueryOutput {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The database is checked first, then the SQL file. Neither is opened here.
pub fn check_preconditions(options: &QueryOptions) -> Result<(), QueryError> {
    if !options.database_path.try_exists()? {
        return Err(QueryError::MissingDatabase {
            path: options.database_path.clone(),
        });
    }
    if !options.query_path.try_exists()? {
        return Err(QueryError::MissingQuery {
            path: options.query_path.clone(),
        });
    }
    Ok(())
}

/// Execute the SQL file verbatim, once, and collect every row.
pub async fn run_query(options: &QueryOptions) -> Result<QueryOutput, QueryError> {
    check_preconditions(options)?;
    let sql = std::fs::read_to_string(&options.query_path)?;

    let connect_options = SqliteConnectOptions::new()
        .filename(&options.database_path)
        .create_if_missing(false);
    let mut conn = SqliteConnection::connect_with(&connect_options).await?;

    let start = Instant::now();
    let fetched = sqlx::raw_sql(&sql).fetch_all(&mut conn).await;
    let closed = conn.close().await;
    let rows = fetched?;
    closed?;

    let output = collect_output(&rows)?;
    info!(
        query = %options.query_path.display(),
        rows = output.rows.len(),
        columns = output.columns.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "query executed"
    );
    Ok(output)
}

fn collect_output(rows: &[SqliteRow]) -> Result<QueryOutput, QueryError> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(decode_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QueryOutput { columns, rows })
}

fn decode_row(row: &SqliteRow) -> Result<Vec<CellValue>, QueryError> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, QueryError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let storage = raw.type_info().name().to_string();

    let value = match storage.as_str() {
        "INTEGER" => CellValue::Integer(row.try_get(index)?),
        "REAL" => CellValue::Real(row.try_get(index)?),
        "BLOB" => CellValue::Blob(row.try_get(index)?),
        _ => CellValue::Text(row.try_get(index)?),
    };
    Ok(value)
}
