//! Output handling: record accumulation and the CSV sink

mod csv_output;
mod store;

pub use csv_output::write_csv;
pub use store::{EmailRecord, ResultStore};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
