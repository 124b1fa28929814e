use std::path::{Path, PathBuf};
use std::time::Instant;

use sqlx::Connection;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection};
use tracing::{info, warn};

use ecomgen_core::{TABLES, TableName, TableSpec, create_schema_sql, csv_path};

use crate::errors::LoadError;
use crate::reader::{SqlValue, read_table_csv};
use crate::report::{LoadReport, TableLoad, TableValidation};

/// Where to read the CSV files from and which database to fill.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
}

/// Ensure every input file exists, parents first. Touches nothing.
pub fn check_inputs(data_dir: &Path) -> Result<Vec<(&'static TableSpec, PathBuf)>, LoadError> {
    let mut inputs = Vec::with_capacity(TABLES.len());
    for table in &TABLES {
        let path = csv_path(data_dir, table.name);
        if !path.try_exists()? {
            return Err(LoadError::MissingInput { path });
        }
        inputs.push((table, path));
    }
    Ok(inputs)
}

/// Replace-load every table from its CSV file and validate row counts.
///
/// All inputs are checked before the database is opened, so a missing file
/// leaves the database untouched (or absent).
pub async fn load_dataset(options: &LoadOptions) -> Result<LoadReport, LoadError> {
    let inputs = check_inputs(&options.data_dir)?;

    let connect_options = SqliteConnectOptions::new()
        .filename(&options.database_path)
        .create_if_missing(true)
        .foreign_keys(true);
    let mut conn = SqliteConnection::connect_with(&connect_options).await?;
    info!(database = %options.database_path.display(), "database opened");

    let outcome = load_into(&mut conn, &inputs).await;
    let closed = conn.close().await;
    let (tables, validations) = outcome?;
    closed?;

    Ok(LoadReport {
        database_path: options.database_path.clone(),
        tables,
        validations,
    })
}

async fn load_into(
    conn: &mut SqliteConnection,
    inputs: &[(&'static TableSpec, PathBuf)],
) -> Result<(Vec<TableLoad>, Vec<TableValidation>), LoadError> {
    sqlx::raw_sql(&create_schema_sql()).execute(&mut *conn).await?;

    // Tables are emptied and refilled one by one; FK checks wait for commit.
    let mut tx = conn.begin().await?;
    sqlx::query("PRAGMA defer_foreign_keys = ON")
        .execute(&mut *tx)
        .await?;

    let mut tables = Vec::with_capacity(inputs.len());
    for (table, path) in inputs {
        let start = Instant::now();
        let rows = read_table_csv(table, path)?;
        let row_count = rows.len() as u64;

        sqlx::query(&format!("DELETE FROM {}", table.name))
            .execute(&mut *tx)
            .await?;
        let insert = table.insert_sql();
        for row in rows {
            let mut query = sqlx::query(&insert);
            for value in row {
                query = bind_value(query, value);
            }
            query.execute(&mut *tx).await?;
        }

        info!(
            table = %table.name,
            rows = row_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "table loaded"
        );
        tables.push(TableLoad {
            table: table.name,
            rows: row_count,
        });
    }
    tx.commit().await?;

    let mut validations = Vec::with_capacity(tables.len());
    for load in &tables {
        let check = TableValidation {
            table: load.table,
            expected: load.rows,
            in_db: count_rows(conn, load.table).await?,
        };
        if check.passed() {
            info!(table = %check.table, rows = check.in_db, "table validated");
        } else {
            warn!(
                table = %check.table,
                expected = check.expected,
                in_db = check.in_db,
                "row count mismatch"
            );
        }
        validations.push(check);
    }

    Ok((tables, validations))
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Integer(value) => query.bind(value),
        SqlValue::Real(value) => query.bind(value),
        SqlValue::Text(value) => query.bind(value),
    }
}

/// Number of rows currently stored in `table`.
pub async fn count_rows(conn: &mut SqliteConnection, table: TableName) -> Result<u64, LoadError> {
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count.max(0) as u64)
}
