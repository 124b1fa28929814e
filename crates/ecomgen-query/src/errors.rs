use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the query runner.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("database not found at {}. Run `ecomgen load` first.", .path.display())]
    MissingDatabase { path: PathBuf },
    #[error("SQL file not found at {}.", .path.display())]
    MissingQuery { path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
