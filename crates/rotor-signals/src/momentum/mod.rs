//! Momentum scoring schemes.
//!
//! Both schemes read the same [`MomentumSnapshot`] of moving averages,
//! trailing returns and volatility and award points per satisfied rule:
//! - [`WeightedMomentum`]: 0–10, trailing returns plus trend and volatility
//!   filters (the default scheme)
//! - [`TrendMomentum`]: 0–8, moving-average stacking plus trailing returns

mod trend;
mod weighted;

pub use trend::{TrendMomentum, TrendMomentumConfig};
pub use weighted::{WeightedMomentum, WeightedMomentumConfig};

use crate::indicators::{pct_change, sma, volatility_regime};
use rotor_traits::{MomentumSnapshot, PriceSeries};

/// Observations in roughly one trading month.
pub const ONE_MONTH: usize = 21;
/// Observations in roughly three trading months.
pub const THREE_MONTHS: usize = 63;
/// Observations in roughly six trading months.
pub const SIX_MONTHS: usize = 126;

/// Compute the shared indicator snapshot for `series`.
///
/// `volatility_window` is the number of daily returns per rolling
/// volatility sample; `None` leaves both volatility fields unset.
#[must_use]
pub fn snapshot(series: &PriceSeries, volatility_window: Option<usize>) -> MomentumSnapshot {
    let closes = series.closes();
    let regime = volatility_window
        .map(|window| volatility_regime(closes, window))
        .unwrap_or_default();

    MomentumSnapshot {
        observations: closes.len(),
        close: series.last_close(),
        sma_20: sma(closes, 20),
        sma_60: sma(closes, 60),
        sma_120: sma(closes, 120),
        return_1m: pct_change(closes, ONE_MONTH),
        return_3m: pct_change(closes, THREE_MONTHS),
        return_6m: pct_change(closes, SIX_MONTHS),
        volatility: regime.current,
        volatility_mean: regime.mean,
    }
}

/// `true` when both values exist and `value > threshold`.
fn above(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(v), Some(t)) if v > t)
}

/// `true` when the value exists and is strictly positive.
fn positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}
