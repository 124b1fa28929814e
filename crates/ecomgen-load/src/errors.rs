use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing CSV: {}. Run `ecomgen generate` first.", .path.display())]
    MissingInput { path: PathBuf },
    #[error("invalid value {value:?} for {file} column '{column}' at line {line}")]
    InvalidValue {
        file: &'static str,
        column: &'static str,
        line: u64,
        value: String,
    },
    #[error(transparent)]
    Schema(#[from] ecomgen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
