//! Error types for price loading.

use thiserror::Error;

/// Errors that can occur while loading price data.
///
/// Loaders return these to their callers; [`crate::load`] absorbs them
/// into an unavailable series so scoring never sees a failure.
#[derive(Debug, Error)]
pub enum DataError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<DataError> for rotor_traits::RotorError {
    fn from(err: DataError) -> Self {
        Self::DataFetch(err.to_string())
    }
}
