//! The price loader seam and fault-absorbing universe loading.

use std::future::Future;

use futures::future::join_all;
use log::{info, warn};
use rotor_traits::{Date, PriceSeries, Sector, Universe};

use crate::Result;

/// A source of daily closing prices.
///
/// Implementations may fail freely; callers that feed scoring go through
/// [`load`], which never fails.
pub trait PriceLoader: Send + Sync {
    /// Fetch closes for `symbol` from `start` (inclusive) to the latest
    /// available date.
    fn fetch(&self, symbol: &str, start: Date) -> impl Future<Output = Result<PriceSeries>> + Send;
}

/// Load one series, turning any failure or empty result into `None`.
pub async fn load<L: PriceLoader>(loader: &L, symbol: &str, start: Date) -> Option<PriceSeries> {
    match loader.fetch(symbol, start).await {
        Ok(series) if !series.is_empty() => {
            info!("loaded {} observations for {symbol}", series.len());
            Some(series)
        }
        Ok(_) => {
            warn!("no price data for {symbol}; treating as unavailable");
            None
        }
        Err(e) => {
            warn!("failed to load {symbol}: {e}; treating as unavailable");
            None
        }
    }
}

/// Load every sector concurrently, preserving sector order.
pub async fn load_universe<L: PriceLoader>(loader: &L, sectors: &[Sector], start: Date) -> Universe {
    let pending = sectors.iter().map(|sector| load(loader, &sector.ticker, start));
    let series = join_all(pending).await;

    let universe: Universe = sectors.iter().cloned().zip(series).collect();
    info!(
        "universe ready: {}/{} sectors with data",
        universe.available().count(),
        universe.len()
    );
    universe
}
