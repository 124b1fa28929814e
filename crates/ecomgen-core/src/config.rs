//! Fixed pipeline configuration. Nothing here is read at runtime.

use std::path::{Path, PathBuf};

use crate::schema::TableName;

pub const NUM_CUSTOMERS: u64 = 120;
pub const NUM_PRODUCTS: u64 = 50;
pub const NUM_ORDERS: u64 = 180;
pub const SEED: u64 = 42;

const DATA_DIR: &str = "data";
const DATABASE_FILE: &str = "ecom.db";
const QUERY_FILE: &str = "query.sql";
const LOGS_DIR: &str = "logs";
const LOG_FILE: &str = "ecomgen.ndjson";

/// File locations used by the three stages, rooted at one directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    pub query_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: PathBuf) -> Self {
        let data_dir = root.join(DATA_DIR);
        let database_path = root.join(DATABASE_FILE);
        let query_path = root.join(QUERY_FILE);
        let logs_dir = root.join(LOGS_DIR);
        Self {
            root,
            data_dir,
            database_path,
            query_path,
            logs_dir,
        }
    }

    pub fn table_csv_path(&self, table: TableName) -> PathBuf {
        csv_path(&self.data_dir, table)
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_dir.join(LOG_FILE)
    }
}

/// Location of a table's CSV file inside `data_dir`.
pub fn csv_path(data_dir: &Path, table: TableName) -> PathBuf {
    data_dir.join(table.file_name())
}
