//! Performance metrics for equity curves.
//!
//! All metrics are total functions: degenerate input (empty curves,
//! non-positive final values, zero variance) yields 0 or `None` rather than
//! NaN.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Rebalancing periods per year for a monthly rotation.
pub const MONTHS_PER_YEAR: usize = 12;

/// Cumulative product of `(1 + r)` starting from 1.0.
///
/// `curve[0] == 1 + returns[0]` and `curve[i] == curve[i-1] * (1 + returns[i])`.
#[must_use]
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |equity, r| {
            *equity *= 1.0 + r;
            Some(*equity)
        })
        .collect()
}

/// Compound annual growth rate of a curve ending at `final_value`.
///
/// `years = periods / periods_per_year`; returns 0 when years is not
/// positive or the final value is not a positive finite number.
#[must_use]
pub fn cagr(final_value: f64, periods: usize, periods_per_year: usize) -> f64 {
    if periods == 0 || periods_per_year == 0 {
        return 0.0;
    }
    if !final_value.is_finite() || final_value <= 0.0 {
        return 0.0;
    }
    let years = periods as f64 / periods_per_year as f64;
    let rate = final_value.powf(1.0 / years) - 1.0;
    if rate.is_finite() { rate } else { 0.0 }
}

/// Maximum drawdown: the minimum of `value / running_max - 1`.
///
/// Always `<= 0`; 0 for an empty or never-declining curve.
#[must_use]
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for &value in curve {
        if !value.is_finite() {
            continue;
        }
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            worst = worst.min(value / peak - 1.0);
        }
    }

    worst
}

/// Annualized sample volatility of period returns.
#[must_use]
pub fn annualized_volatility(returns: &[f64], periods_per_year: usize) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let std = ArrayView1::from(returns).std(1.0);
    let vol = std * (periods_per_year as f64).sqrt();
    vol.is_finite().then_some(vol)
}

/// Annualized Sharpe ratio with a zero risk-free rate.
#[must_use]
pub fn sharpe_ratio(returns: &[f64], periods_per_year: usize) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let view = ArrayView1::from(returns);
    let mean = view.mean()?;
    let std = view.std(1.0);

    if std == 0.0 || !std.is_finite() {
        None
    } else {
        Some(mean / std * (periods_per_year as f64).sqrt())
    }
}

/// Fraction of periods with a strictly positive return.
#[must_use]
pub fn win_rate(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    Some(wins as f64 / returns.len() as f64)
}

/// Summary statistics of a backtest's period returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Number of periods.
    pub periods: usize,
    /// Final equity minus one.
    pub total_return: f64,
    /// Compound annual growth rate.
    pub cagr: f64,
    /// Maximum drawdown (<= 0).
    pub max_drawdown: f64,
    /// Annualized volatility of period returns.
    pub volatility: Option<f64>,
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: Option<f64>,
    /// Share of winning periods.
    pub win_rate: Option<f64>,
}

impl PerformanceSummary {
    /// Compute every metric from period returns.
    #[must_use]
    pub fn from_returns(returns: &[f64], periods_per_year: usize) -> Self {
        let curve = equity_curve(returns);
        let final_value = curve.last().copied().unwrap_or(1.0);

        Self {
            periods: returns.len(),
            total_return: final_value - 1.0,
            cagr: cagr(final_value, returns.len(), periods_per_year),
            max_drawdown: max_drawdown(&curve),
            volatility: annualized_volatility(returns, periods_per_year),
            sharpe_ratio: sharpe_ratio(returns, periods_per_year),
            win_rate: win_rate(returns),
        }
    }
}
