//! Offline loader reading saved price files.

use std::path::{Path, PathBuf};

use log::debug;
use rotor_traits::{Date, PriceSeries};

use crate::{
    Result,
    error::DataError,
    loader::PriceLoader,
    types::{HistoricalPrice, PriceResponse, to_series},
};

/// Loads `<dir>/<SYMBOL>.json` files in the FMP history format.
///
/// Both the flat array and the `{"historical": [...]}` shape are accepted.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    dir: PathBuf,
}

impl JsonFileLoader {
    /// Create a loader rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the price files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `symbol`.
    #[must_use]
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol.trim().to_uppercase()))
    }

    /// Write `series` to the file for `symbol`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn store(&self, symbol: &str, series: &PriceSeries) -> Result<PathBuf> {
        let mut rows: Vec<HistoricalPrice> = series.points().map(HistoricalPrice::from_point).collect();
        rows.reverse();

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(symbol);
        tokio::fs::write(&path, serde_json::to_vec_pretty(&rows)?).await?;
        Ok(path)
    }
}

impl PriceLoader for JsonFileLoader {
    async fn fetch(&self, symbol: &str, start: Date) -> Result<PriceSeries> {
        let path = self.path_for(symbol);
        debug!("reading {}", path.display());

        let bytes = tokio::fs::read(&path).await?;
        let rows = serde_json::from_slice::<PriceResponse>(&bytes)?.into_rows();
        let series: PriceSeries = to_series(&rows).points().filter(|p| p.date >= start).collect();

        if series.is_empty() {
            return Err(DataError::NoData(symbol.to_string()));
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotor_traits::PricePoint;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_filters_by_start() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[
            {"date":"2024-01-04","close":103.0},
            {"date":"2024-01-03","close":102.0},
            {"date":"2024-01-02","close":101.0}
        ]"#;
        std::fs::write(dir.path().join("SOXX.json"), body).unwrap();

        let loader = JsonFileLoader::new(dir.path());
        let series = loader.fetch("soxx", date(2024, 1, 3)).await.unwrap();
        assert_eq!(series.closes(), &[102.0, 103.0]);
        assert_eq!(series.first_date(), Some(date(2024, 1, 3)));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = JsonFileLoader::new(dir.path());
        let err = loader.fetch("XLE", date(2024, 1, 1)).await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("XLE.json"), "{not json").unwrap();
        let loader = JsonFileLoader::new(dir.path());
        let err = loader.fetch("XLE", date(2024, 1, 1)).await.unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[tokio::test]
    async fn test_store_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let loader = JsonFileLoader::new(dir.path().join("prices"));
        let series: PriceSeries = (1..=5)
            .map(|d| PricePoint::new(date(2024, 2, d), f64::from(d)))
            .collect();

        let path = loader.store("lit", &series).await.unwrap();
        assert!(path.ends_with("LIT.json"));

        let loaded = loader.fetch("LIT", date(2024, 1, 1)).await.unwrap();
        assert_eq!(loaded, series);
    }
}
