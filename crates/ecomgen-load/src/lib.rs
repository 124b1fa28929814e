//! SQLite loader for the generated ecomgen CSV files.
//!
//! Loading is a full replace: every table is emptied and repopulated from its
//! file, then row counts are compared against what was read.

pub mod errors;
pub mod loader;
pub mod reader;
pub mod report;

pub use errors::LoadError;
pub use loader::{LoadOptions, check_inputs, count_rows, load_dataset};
pub use reader::{SqlValue, read_table_csv};
pub use report::{LoadReport, TableLoad, TableValidation};
