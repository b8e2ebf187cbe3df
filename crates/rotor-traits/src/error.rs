//! Error types for the rotor toolkit.
//!
//! Scoring and backtesting absorb data problems locally and never fail, so
//! these errors only surface from configuration, lookups and frame interop.

use thiserror::Error;

/// The main error type for rotor operations.
#[derive(Debug, Error)]
pub enum RotorError {
    /// Error when a required column is missing from a frame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when a sector is not part of the configured universe.
    #[error("Sector not found: {0}")]
    SectorNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error when a scoring scheme is not registered.
    #[error("Scoring scheme not found: {0}")]
    SchemeNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RotorError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RotorError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for rotor operations.
pub type Result<T> = std::result::Result<T, RotorError>;
