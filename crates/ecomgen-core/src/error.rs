use thiserror::Error;

/// Core error type shared across ecomgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A table name did not match any known table.
    #[error("unknown table: {0}")]
    UnknownTable(String),
    /// A record does not line up with the table it belongs to.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by ecomgen crates.
pub type Result<T> = std::result::Result<T, Error>;
