//! Output module for exporting scrape results
//!
//! This module handles:
//! - Writing movie records to a CSV file
//! - Recording and displaying run statistics

mod csv_export;
pub mod stats;

pub use csv_export::{format_csv, write_csv, write_records};
pub use stats::{format_statistics, print_statistics, RunStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
