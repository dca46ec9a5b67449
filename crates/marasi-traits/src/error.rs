//! Error types for the Marasi framework.
//!
//! This module defines the error types used throughout the Marasi ecosystem,
//! covering period parsing, dataset schema validation, and alignment failures.

use thiserror::Error;

/// The main error type for Marasi operations.
///
/// This enum encompasses all error cases that can occur when normalizing
/// periods, resampling raw datasets, and unifying series onto a common axis.
#[derive(Debug, Error)]
pub enum MarasiError {
    /// A period label could not be parsed into a canonical quarter.
    ///
    /// The resampler recovers from this locally by dropping the record and
    /// counting it; it is never fatal to a pipeline run.
    #[error("Unparsable period label: {0}")]
    PeriodParse(String),

    /// An expected field was absent from a raw record.
    ///
    /// This rejects the whole dataset: the pipeline cannot silently guess a
    /// substitute field. The caller decides whether to continue without it.
    #[error("Schema mismatch in dataset '{dataset}': missing field '{field}'")]
    SchemaMismatch {
        /// Name of the dataset being resampled.
        dataset: String,
        /// Name of the missing field.
        field: String,
    },

    /// Not enough data to perform the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Two series would produce the same column name in the unified table.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column was not found in the unified table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for MarasiError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for MarasiError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Marasi operations.
///
/// This is a convenience type that uses [`MarasiError`] as the error type.
pub type Result<T> = std::result::Result<T, MarasiError>;
