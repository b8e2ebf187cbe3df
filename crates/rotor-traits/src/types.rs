//! Common types used throughout the rotor toolkit.
//!
//! This module defines the price series, sector and universe types that flow
//! from the data loader into scoring and backtesting.

use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Result, RotorError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically an ETF ticker such as "SOXX".
pub type Symbol = String;

/// A bounded integer momentum score attached to one sector at one date.
pub type MomentumScore = u8;

/// Days between 0001-01-01 (CE) and 1970-01-01, for decoding polars dates.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// A single daily closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Create a new observation.
    #[must_use]
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// An ordered series of daily closing prices.
///
/// Dates are strictly increasing and closes are finite and positive. The
/// series is immutable once built; every derived view (truncation, windows)
/// produces a new value or a borrowed slice.
///
/// # Example
///
/// ```
/// use rotor_traits::{Date, PricePoint, PriceSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let series = PriceSeries::from_points(vec![
///     PricePoint::new(d(3), 101.0),
///     PricePoint::new(d(2), 100.0),
///     PricePoint::new(d(4), f64::NAN),
/// ]);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.last_close(), Some(101.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    dates: Vec<Date>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from raw observations.
    ///
    /// Observations are sorted by date, non-finite or non-positive closes are
    /// dropped and duplicate dates collapse to the last value seen for them.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .collect();
        // Stable sort keeps input order among equal dates so "last wins" holds.
        points.sort_by_key(|p| p.date);

        let mut dates: Vec<Date> = Vec::with_capacity(points.len());
        let mut closes: Vec<f64> = Vec::with_capacity(points.len());
        for point in points {
            if dates.last() == Some(&point.date) {
                if let Some(last) = closes.last_mut() {
                    *last = point.close;
                }
            } else {
                dates.push(point.date);
                closes.push(point.close);
            }
        }

        Self { dates, closes }
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Closing prices aligned with [`dates`](Self::dates).
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Iterate over the observations.
    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.dates
            .iter()
            .zip(&self.closes)
            .map(|(&date, &close)| PricePoint { date, close })
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// The most recent closing price.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// The last close dated on or before `date`.
    pub fn close_on_or_before(&self, date: Date) -> Option<f64> {
        self.observations_through(date)
            .checked_sub(1)
            .map(|idx| self.closes[idx])
    }

    /// Number of observations dated on or before `date`.
    pub fn observations_through(&self, date: Date) -> usize {
        self.dates.partition_point(|d| *d <= date)
    }

    /// A new series holding only the observations dated on or before `date`.
    #[must_use]
    pub fn truncate_to(&self, date: Date) -> Self {
        let end = self.observations_through(date);
        Self {
            dates: self.dates[..end].to_vec(),
            closes: self.closes[..end].to_vec(),
        }
    }

    /// Closing prices dated in `(start, end]`.
    pub fn window(&self, start: Date, end: Date) -> &[f64] {
        let lo = self.observations_through(start);
        let hi = self.observations_through(end).max(lo);
        &self.closes[lo..hi]
    }

    /// Convert into a DataFrame with `date` and `close` columns.
    ///
    /// # Errors
    ///
    /// Returns an error if polars fails to build the frame.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let frame = df! {
            "date" => &self.dates,
            "close" => &self.closes,
        }?;
        Ok(frame)
    }

    /// Build a series from a DataFrame with `date` and `close` columns.
    ///
    /// Null rows are dropped and the usual cleaning rules of
    /// [`from_points`](Self::from_points) apply.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has the wrong dtype.
    pub fn from_frame(frame: &DataFrame) -> Result<Self> {
        for col in ["date", "close"] {
            if frame.column(col).is_err() {
                return Err(RotorError::MissingColumn(col.to_string()));
            }
        }

        let dates: Vec<Option<Date>> = frame
            .column("date")?
            .as_materialized_series()
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|days| Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS))
            })
            .collect();
        let closes: Vec<Option<f64>> = frame
            .column("close")?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();

        let points = dates
            .into_iter()
            .zip(closes)
            .filter_map(|(date, close)| Some(PricePoint::new(date?, close?)));

        Ok(Self::from_points(points))
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

/// A sector of the rotation universe.
///
/// The label is what users see; the ticker identifies the tradeable
/// instrument standing in for the sector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{label} ({ticker})")]
pub struct Sector {
    /// Display name, e.g. "Semiconductors".
    pub label: String,
    /// Instrument identifier, e.g. "SOXX".
    pub ticker: Symbol,
}

impl Sector {
    /// Create a new sector.
    pub fn new(label: impl Into<String>, ticker: impl Into<Symbol>) -> Self {
        Self {
            label: label.into(),
            ticker: ticker.into(),
        }
    }

    /// Whether `query` names this sector, by label or ticker (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        self.label.eq_ignore_ascii_case(query) || self.ticker.eq_ignore_ascii_case(query)
    }
}

/// One sector together with its loaded price history.
#[derive(Debug, Clone)]
pub struct UniverseEntry {
    /// The sector.
    pub sector: Sector,
    /// Price history, `None` when the data source had nothing usable.
    pub series: Option<PriceSeries>,
}

/// An ordered set of sectors and their price histories.
///
/// Order is significant: it is the configuration order and breaks ties
/// wherever sectors are ranked.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    entries: Vec<UniverseEntry>,
}

impl Universe {
    /// Create an empty universe.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a sector. Empty series are stored as unavailable.
    pub fn push(&mut self, sector: Sector, series: Option<PriceSeries>) {
        let series = series.filter(|s| !s.is_empty());
        self.entries.push(UniverseEntry { sector, series });
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, sector: Sector, series: Option<PriceSeries>) -> Self {
        self.push(sector, series);
        self
    }

    /// Number of sectors, including those without data.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the universe has no sectors.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &UniverseEntry> {
        self.entries.iter()
    }

    /// Iterate over sectors that have price data.
    pub fn available(&self) -> impl Iterator<Item = (&Sector, &PriceSeries)> {
        self.entries
            .iter()
            .filter_map(|e| e.series.as_ref().map(|s| (&e.sector, s)))
    }

    /// Find a sector by label or ticker.
    pub fn find(&self, query: &str) -> Option<&UniverseEntry> {
        self.entries.iter().find(|e| e.sector.matches(query))
    }

    /// The latest observation date across all available series.
    pub fn latest_date(&self) -> Option<Date> {
        self.available().filter_map(|(_, s)| s.last_date()).max()
    }

    /// The earliest observation date across all available series.
    pub fn earliest_date(&self) -> Option<Date> {
        self.available().filter_map(|(_, s)| s.first_date()).min()
    }
}

impl FromIterator<(Sector, Option<PriceSeries>)> for Universe {
    fn from_iter<I: IntoIterator<Item = (Sector, Option<PriceSeries>)>>(iter: I) -> Self {
        let mut universe = Self::new();
        for (sector, series) in iter {
            universe.push(sector, series);
        }
        universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> Date {
        Date::from_ymd_opt(2024, month, day).unwrap()
    }

    fn sample() -> PriceSeries {
        PriceSeries::from_points(vec![
            PricePoint::new(d(1, 2), 10.0),
            PricePoint::new(d(1, 3), 11.0),
            PricePoint::new(d(1, 31), 12.0),
            PricePoint::new(d(2, 1), 13.0),
            PricePoint::new(d(2, 29), 14.0),
        ])
    }

    #[test]
    fn test_from_points_sorts_and_cleans() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(d(1, 4), 12.0),
            PricePoint::new(d(1, 2), 10.0),
            PricePoint::new(d(1, 3), f64::NAN),
            PricePoint::new(d(1, 5), -1.0),
            PricePoint::new(d(1, 6), 0.0),
            PricePoint::new(d(1, 7), f64::INFINITY),
        ]);

        assert_eq!(series.dates(), &[d(1, 2), d(1, 4)]);
        assert_eq!(series.closes(), &[10.0, 12.0]);
    }

    #[test]
    fn test_from_points_dedup_last_wins() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(d(1, 2), 10.0),
            PricePoint::new(d(1, 2), 10.5),
            PricePoint::new(d(1, 3), 11.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), &[10.5, 11.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.last_close(), None);
        assert_eq!(series.first_date(), None);
        assert!(series.window(d(1, 1), d(12, 31)).is_empty());
    }

    #[test]
    fn test_truncate_to() {
        let series = sample();
        let truncated = series.truncate_to(d(1, 31));
        assert_eq!(truncated.len(), 3);
        assert_eq!(truncated.last_date(), Some(d(1, 31)));

        assert!(series.truncate_to(d(1, 1)).is_empty());
        assert_eq!(series.truncate_to(d(12, 31)).len(), 5);
    }

    #[test]
    fn test_close_on_or_before() {
        let series = sample();
        assert_eq!(series.close_on_or_before(d(1, 1)), None);
        assert_eq!(series.close_on_or_before(d(1, 2)), Some(10.0));
        // Weekend or holiday falls back to the prior observation.
        assert_eq!(series.close_on_or_before(d(2, 28)), Some(13.0));
        assert_eq!(series.close_on_or_before(d(12, 31)), Some(14.0));
    }

    #[test]
    fn test_window_bounds() {
        let series = sample();
        // (Jan 31, Feb 29]: start exclusive, end inclusive
        assert_eq!(series.window(d(1, 31), d(2, 29)), &[13.0, 14.0]);
        assert_eq!(series.window(d(1, 2), d(1, 3)), &[11.0]);
        assert!(series.window(d(3, 1), d(2, 1)).is_empty());
    }

    #[test]
    fn test_frame_round_trip_keeps_values() {
        let series = sample();
        let frame = series.to_frame().unwrap();
        assert_eq!(frame.height(), 5);

        let back = PriceSeries::from_frame(&frame).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_from_frame_missing_column() {
        let frame = df! { "close" => &[1.0, 2.0] }.unwrap();
        let err = PriceSeries::from_frame(&frame).unwrap_err();
        assert!(matches!(err, RotorError::MissingColumn(c) if c == "date"));
    }

    #[test]
    fn test_sector_display_and_match() {
        let sector = Sector::new("Energy", "XLE");
        assert_eq!(sector.to_string(), "Energy (XLE)");
        assert!(sector.matches("energy"));
        assert!(sector.matches("xle"));
        assert!(!sector.matches("XLK"));
    }

    #[test]
    fn test_universe_order_and_availability() {
        let universe = Universe::new()
            .with(Sector::new("A", "AAA"), Some(sample()))
            .with(Sector::new("B", "BBB"), None)
            .with(Sector::new("C", "CCC"), Some(PriceSeries::default()));

        assert_eq!(universe.len(), 3);
        let labels: Vec<&str> = universe.iter().map(|e| e.sector.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);

        // Empty series are stored as unavailable.
        assert_eq!(universe.available().count(), 1);
        assert!(universe.find("ccc").unwrap().series.is_none());
        assert_eq!(universe.latest_date(), Some(d(2, 29)));
        assert_eq!(universe.earliest_date(), Some(d(1, 2)));
    }

    #[test]
    fn test_sector_serde() {
        let sector: Sector = serde_json::from_str(r#"{"label":"AI","ticker":"BOTZ"}"#).unwrap();
        assert_eq!(sector, Sector::new("AI", "BOTZ"));
    }
}
