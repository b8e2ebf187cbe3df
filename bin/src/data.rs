//! Data loading utilities for the rotor CLI.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use rotor_data::{FmpClient, JsonFileLoader, PriceCache, PriceLoader, load_universe};
use rotor_traits::{Date, PriceSeries, RotorError, Sector, Universe};

use crate::config::ProviderConfig;

/// Where prices come from for this run.
#[derive(Debug)]
pub(crate) enum Source {
    /// FMP API behind a session cache.
    Api(PriceCache<FmpClient>),
    /// Saved JSON files.
    Files(JsonFileLoader),
}

impl Source {
    /// Build the source described by `provider`.
    pub(crate) fn from_config(provider: &ProviderConfig) -> Result<Self> {
        if let Some(dir) = &provider.data_dir {
            info!("reading prices from {}", dir.display());
            return Ok(Self::Files(JsonFileLoader::new(dir)));
        }

        let mut client = FmpClient::from_env()
            .context("set FMP_API_KEY or pass --data-dir to work offline")?
            .with_timeout(Duration::from_secs(provider.timeout_secs));
        if let Some(url) = &provider.base_url {
            client = client.with_base_url(url);
        }
        Ok(Self::Api(PriceCache::new(client)))
    }

    /// Load every sector; unavailable ones are kept as empty entries.
    pub(crate) async fn universe(&self, sectors: &[Sector], start: Date) -> Universe {
        load_universe(self, sectors, start).await
    }
}

impl PriceLoader for Source {
    async fn fetch(&self, symbol: &str, start: Date) -> rotor_data::Result<PriceSeries> {
        match self {
            Self::Api(loader) => loader.fetch(symbol, start).await,
            Self::Files(loader) => loader.fetch(symbol, start).await,
        }
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, RotorError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| RotorError::InvalidDate(format!("{date_str}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::path::PathBuf;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        let result = parse_date("invalid");
        assert!(matches!(result, Err(RotorError::InvalidDate(_))));
    }

    #[test]
    fn test_data_dir_selects_file_source() {
        let provider = ProviderConfig {
            data_dir: Some(PathBuf::from("prices")),
            ..ProviderConfig::default()
        };
        let source = Source::from_config(&provider).unwrap();
        assert!(matches!(source, Source::Files(ref l) if l.dir() == PathBuf::from("prices")));
    }
}
