//! Error types for bikestat
//!
//! This module defines the error types used throughout the bikestat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikestat::error::{BikestatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikestatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bikestat operations
///
/// This enum encompasses all possible errors that can occur during
/// bikestat operations, from IO errors to malformed source rows and
/// aggregations over empty tables.
#[derive(Error, Debug)]
pub enum BikestatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// City outside the closed set of known cities
    #[error("Unknown city: {0} (expected chicago, new york city, or washington)")]
    UnknownCity(String),

    /// Month outside the supported January..June window
    #[error("Invalid month: {0} (expected january through june, or 'all')")]
    InvalidMonth(String),

    /// Day outside the seven weekday names
    #[error("Invalid day: {0} (expected a full weekday name, or 'all')")]
    InvalidDay(String),

    /// A required column is absent from a city source
    #[error("Missing column {column:?} in {file}")]
    MissingColumn {
        /// The source file with the incomplete header
        file: PathBuf,
        /// The required column name
        column: &'static str,
    },

    /// Malformed row content in a source file
    #[error("Parse error in {file} line {line}: {message}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// 1-based data row number
        line: u64,
        /// The error message
        message: String,
    },

    /// An aggregation that needs a mode or mean received zero rows
    #[error("No trips to aggregate")]
    EmptyTable,
}

/// Convenience type alias for Results in bikestat
///
/// # Example
///
/// ```
/// use bikestat::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, BikestatError>;
