#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rotor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # rotor
//!
//! Sector ETF momentum scoring and monthly rotation backtesting.
//!
//! rotor is an umbrella crate that re-exports all rotor sub-crates for
//! convenience: price loading, momentum scoring, score ranking and the
//! single-holding rotation backtest.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rotor::prelude::*;
//!
//! # async fn example(sectors: Vec<Sector>, start: Date) -> rotor::Result<()> {
//! let loader = PriceCache::new(FmpClient::from_env()?);
//! let universe = load_universe(&loader, &sectors, start).await;
//!
//! let scorer = create_scorer("weighted")?;
//! let table = ScoreTable::compute(&universe, scorer.as_ref());
//!
//! let dates = evaluation_dates(&universe, start);
//! let result = RotationBacktest::default().run(&universe, &dates, scorer.as_ref());
//! println!("CAGR {:.2}%", result.summary.cagr * 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Price series, universe, the [`Scorer`] trait and errors
//! - [`signals`] - Indicators and the momentum scoring schemes
//! - [`eval`] - Calendars, ranking, backtest and performance metrics
//! - [`data`] - Price loaders (FMP API, JSON files) and the session cache
//!
//! ## Pipeline
//!
//! 1. **Loaders** fetch daily closes; failures become unavailable sectors
//! 2. **Scorers** map each series to a bounded integer score
//! 3. **Score tables** rank sectors by their latest score
//! 4. **The backtest** holds the top sector each month and compounds its return

/// Version information for the rotor crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
///
/// - [`PriceSeries`](traits::PriceSeries) - Date-ordered closing prices
/// - [`Universe`](traits::Universe) - Sectors with optional price series
/// - [`Scorer`] - A momentum scoring scheme
pub mod traits {
    pub use rotor_traits::*;
}

pub use rotor_traits::{Result, RotorError, Scorer};
pub use rotor_traits::{Date, MomentumScore, PriceSeries, Sector, Symbol, Universe};

// ============================================================================
// Scoring
// ============================================================================

/// Momentum indicators and scoring schemes.
///
/// ## Available Schemes
///
/// - **weighted** (default): 3m/6m returns, close above SMA120, calm volatility; 0-10
/// - **trend**: close above SMA20/60/120 plus 3m/6m returns; 0-8
pub mod signals {
    pub use rotor_signals::*;
}

// ============================================================================
// Evaluation
// ============================================================================

/// Ranking, rotation backtest and performance metrics.
///
/// ## Metrics
///
/// ```text
/// equity_i = equity_{i-1} * (1 + r_i)
/// CAGR     = equity_n ^ (12 / n) - 1
/// MDD      = min_i (equity_i / max_{j<=i} equity_j - 1)
/// ```
pub mod eval {
    pub use rotor_eval::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Price loaders.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
///
/// Or point a [`JsonFileLoader`](data::JsonFileLoader) at a directory of
/// saved price files to work offline.
pub mod data {
    pub use rotor_data::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use rotor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use rotor_data::{
        DataError, FmpClient, JsonFileLoader, PriceCache, PriceLoader, load, load_universe,
    };
    pub use rotor_eval::calendar::{evaluation_dates, month_ends};
    pub use rotor_eval::{
        BacktestConfig, BacktestResult, PerformanceSummary, RotationBacktest, ScoreTable,
        Selection,
    };
    pub use rotor_signals::{DEFAULT_SCHEME, available_schemes, create_scorer};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_scorer(_scorer: &dyn Scorer) {}
        fn _accept_loader<L: data::PriceLoader>(_loader: &L) {}
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = RotorError::SchemeNotFound("x".to_string());
        assert!(error.to_string().contains('x'));
    }
}
