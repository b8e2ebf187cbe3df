//! Wire types for end-of-day price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rotor_traits::{PricePoint, PriceSeries};

/// Historical price row from FMP.
///
/// Only the close is consumed; rows with a missing close or unparseable
/// date are dropped when converting to a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Open price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// High price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// Low price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// Close price.
    #[serde(default)]
    pub close: Option<f64>,
    /// Volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// The row as a price point, if it has a date and a close.
    #[must_use]
    pub fn point(&self) -> Option<PricePoint> {
        Some(PricePoint::new(self.parsed_date()?, self.close?))
    }

    /// A close-only row for `point`.
    #[must_use]
    pub fn from_point(point: PricePoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            open: None,
            high: None,
            low: None,
            close: Some(point.close),
            volume: None,
        }
    }
}

/// Legacy wrapper for historical price responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoricalPriceResponse {
    pub(crate) historical: Vec<HistoricalPrice>,
}

/// Either response shape served for historical prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceResponse {
    Flat(Vec<HistoricalPrice>),
    Wrapped(HistoricalPriceResponse),
}

impl PriceResponse {
    pub(crate) fn into_rows(self) -> Vec<HistoricalPrice> {
        match self {
            Self::Flat(rows) => rows,
            Self::Wrapped(wrapped) => wrapped.historical,
        }
    }
}

/// Convert raw rows (any order) into a clean series.
#[must_use]
pub fn to_series(rows: &[HistoricalPrice]) -> PriceSeries {
    rows.iter().filter_map(HistoricalPrice::point).collect()
}
