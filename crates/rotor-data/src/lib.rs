//! Price loaders for rotor.
//!
//! This crate fetches daily closing prices and hands them to scoring as
//! clean [`PriceSeries`](rotor_traits::PriceSeries) values:
//! - [`FmpClient`]: the [Financial Modeling Prep](https://financialmodelingprep.com/)
//!   end-of-day price endpoint
//! - [`JsonFileLoader`]: the same wire format read from a local directory
//! - [`PriceCache`]: an explicit per-session cache keyed by symbol and start date
//!
//! Failures never reach scoring: [`load`] and [`load_universe`] turn every
//! error or empty result into an unavailable series.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rotor_data::{FmpClient, PriceCache, load_universe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = PriceCache::new(FmpClient::from_env()?);
//!     let universe = load_universe(&loader, &sectors, start).await;
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod cache;
mod client;
mod error;
mod files;
mod loader;
mod types;

pub use cache::PriceCache;
pub use client::{DEFAULT_TIMEOUT, FmpClient};
pub use error::DataError;
pub use files::JsonFileLoader;
pub use loader::{PriceLoader, load, load_universe};
pub use types::{HistoricalPrice, to_series};

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
