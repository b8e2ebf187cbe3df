//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rotor_signals::{DEFAULT_SCHEME, create_scorer};
use rotor_traits::Sector;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// First date of price history to request.
    #[serde(default = "default_start")]
    pub(crate) start_date: NaiveDate,
    /// Scoring scheme name or alias.
    #[serde(default = "default_scheme")]
    pub(crate) scheme: String,
    /// Sectors in display and tie-break order.
    #[serde(default = "default_sectors")]
    pub(crate) sectors: Vec<SectorConfig>,
    #[serde(default)]
    pub(crate) provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SectorConfig {
    pub(crate) label: String,
    pub(crate) ticker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProviderConfig {
    /// Read `<dir>/<TICKER>.json` instead of calling the API.
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Override for the API root.
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub(crate) timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default()
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.into()
}

fn default_timeout() -> u64 {
    30
}

fn default_sectors() -> Vec<SectorConfig> {
    [
        ("Semiconductors", "SOXX"),
        ("Internet", "FDN"),
        ("AI", "BOTZ"),
        ("Biotech", "IBB"),
        ("Energy", "XLE"),
        ("Batteries/Lithium", "LIT"),
    ]
    .into_iter()
    .map(|(label, ticker)| SectorConfig {
        label: label.into(),
        ticker: ticker.into(),
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_date: default_start(),
            scheme: default_scheme(),
            sectors: default_sectors(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, or the built-in defaults when it does not
    /// and was not asked for explicitly.
    pub(crate) fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if path.exists() || explicit {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate config invariants.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.sectors.is_empty() {
            bail!("at least one sector must be configured");
        }
        for (i, sector) in self.sectors.iter().enumerate() {
            if sector.label.trim().is_empty() || sector.ticker.trim().is_empty() {
                bail!("sector #{} needs a label and a ticker", i + 1);
            }
            if self.sectors[..i]
                .iter()
                .any(|other| other.ticker.eq_ignore_ascii_case(&sector.ticker))
            {
                bail!("ticker {} is configured twice", sector.ticker);
            }
        }
        if self.provider.timeout_secs == 0 {
            bail!("provider.timeout_secs must be > 0");
        }
        create_scorer(&self.scheme)?;
        Ok(())
    }

    /// Configured sectors in order.
    pub(crate) fn sectors(&self) -> Vec<Sector> {
        self.sectors
            .iter()
            .map(|s| Sector::new(s.label.trim(), s.ticker.trim().to_uppercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_toml() -> &'static str {
        r#"
start_date = "2020-06-01"
scheme = "trend"

[[sectors]]
label = "Semiconductors"
ticker = "soxx"

[[sectors]]
label = "Energy"
ticker = "XLE"

[provider]
data_dir = "./prices"
timeout_secs = 10
"#
    }

    #[test]
    fn test_parse_example_config() {
        let config: Config = toml::from_str(example_toml()).unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
        assert_eq!(config.scheme, "trend");
        assert_eq!(config.sectors.len(), 2);
        assert_eq!(config.provider.data_dir, Some(PathBuf::from("./prices")));
        assert_eq!(config.provider.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sectors_are_normalized() {
        let config: Config = toml::from_str(example_toml()).unwrap();
        let sectors = config.sectors();
        assert_eq!(sectors[0], Sector::new("Semiconductors", "SOXX"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(config.scheme, DEFAULT_SCHEME);
        let tickers: Vec<&str> = config.sectors.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, ["SOXX", "FDN", "BOTZ", "IBB", "XLE", "LIT"]);
        assert_eq!(config.provider.timeout_secs, 30);
    }

    #[test]
    fn test_validate_catches_unknown_scheme() {
        let mut config = Config::default();
        config.scheme = "astrology".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_catches_duplicate_ticker() {
        let mut config = Config::default();
        config.sectors.push(SectorConfig {
            label: "Chips again".into(),
            ticker: "soxx".into(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_catches_empty_sectors() {
        let mut config = Config::default();
        config.sectors.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("stat_date = \"2020-01-01\"").is_err());
    }

    #[test]
    fn test_missing_default_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotor.toml");
        assert!(Config::load_or_default(&path, false).is_ok());
        assert!(Config::load_or_default(&path, true).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotor.toml");
        std::fs::write(&path, example_toml()).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.scheme, "trend");
    }
}
