//! Price indicators evaluated at the last observation of a series.
//!
//! Every function returns `None` (or skips the value) instead of producing a
//! non-finite number, which lets scoring rules treat "not computable" as
//! "not satisfied".

use ndarray::ArrayView1;

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Simple moving average of the last `window` values.
#[must_use]
pub fn sma(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = ArrayView1::from(&values[values.len() - window..]);
    tail.mean().and_then(finite)
}

/// Simple moving average at every position, `None` until `window` values
/// are available. Same length as `values`.
#[must_use]
pub fn rolling_sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|end| {
            if window == 0 || end + 1 < window {
                None
            } else {
                sma(&values[..=end], window)
            }
        })
        .collect()
}

/// Fractional change between the last value and the value `lookback`
/// observations earlier.
#[must_use]
pub fn pct_change(values: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 || values.len() <= lookback {
        return None;
    }
    let current = values[values.len() - 1];
    let past = values[values.len() - 1 - lookback];
    finite(current / past - 1.0)
}

/// One-period fractional returns; one element shorter than the input.
#[must_use]
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Sample standard deviation (ddof = 1) of every full `window` of `values`.
#[must_use]
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    if window < 2 || values.len() < window {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| ArrayView1::from(w).std(1.0))
        .collect()
}

/// Rolling volatility of daily returns, current value and historical mean.
///
/// The mean is taken over every finite rolling value in the series,
/// including the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolatilityRegime {
    /// Volatility over the latest window.
    pub current: Option<f64>,
    /// Mean of all rolling volatility values.
    pub mean: Option<f64>,
}

impl VolatilityRegime {
    /// Whether current volatility sits strictly below its historical mean.
    #[must_use]
    pub fn is_calm(&self) -> bool {
        matches!((self.current, self.mean), (Some(current), Some(mean)) if current < mean)
    }
}

/// Compute the volatility regime of closing prices over `window` returns.
#[must_use]
pub fn volatility_regime(closes: &[f64], window: usize) -> VolatilityRegime {
    let vols = rolling_std(&daily_returns(closes), window);
    let current = vols.last().copied().and_then(finite);
    let history: Vec<f64> = vols.into_iter().filter(|v| v.is_finite()).collect();
    let mean = if history.is_empty() {
        None
    } else {
        ArrayView1::from(&history).mean().and_then(finite)
    };
    VolatilityRegime { current, mean }
}
