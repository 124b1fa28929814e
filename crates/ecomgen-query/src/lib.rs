//! Runs a single SQL file against the loaded database and renders the rows.

pub mod errors;
pub mod render;
pub mod runner;

pub use errors::QueryError;
pub use render::{NO_ROWS_MESSAGE, render_output};
pub use runner::{CellValue, QueryOptions, QueryOutput, check_preconditions, run_query};
