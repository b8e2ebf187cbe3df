//! Moving-average trend score (0–8).

use serde::{Deserialize, Serialize};

use super::{above, positive, snapshot};
use rotor_traits::{MomentumScore, MomentumSnapshot, PriceSeries, Scorer};

/// Configuration for the trend momentum score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendMomentumConfig {
    /// Series shorter than this score 0 (default: 150).
    pub min_observations: usize,
}

impl Default for TrendMomentumConfig {
    fn default() -> Self {
        Self {
            min_observations: 150,
        }
    }
}

/// Trend momentum scheme.
///
/// One point for the close above each of the 20/60/120-period averages,
/// two for a positive 3-month return and three for a positive 6-month
/// return.
#[derive(Debug, Clone, Default)]
pub struct TrendMomentum {
    config: TrendMomentumConfig,
}

impl TrendMomentum {
    /// Create a scorer with the given configuration.
    #[must_use]
    pub const fn new(config: TrendMomentumConfig) -> Self {
        Self { config }
    }

    /// Points awarded for an already computed snapshot.
    #[must_use]
    pub fn points(snap: &MomentumSnapshot) -> MomentumScore {
        let mut score = 0;
        for ma in [snap.sma_20, snap.sma_60, snap.sma_120] {
            if above(snap.close, ma) {
                score += 1;
            }
        }
        if positive(snap.return_3m) {
            score += 2;
        }
        if positive(snap.return_6m) {
            score += 3;
        }
        score
    }
}

impl Scorer for TrendMomentum {
    fn name(&self) -> &str {
        "trend"
    }

    fn min_observations(&self) -> usize {
        self.config.min_observations
    }

    fn max_score(&self) -> MomentumScore {
        8
    }

    fn snapshot(&self, series: &PriceSeries) -> MomentumSnapshot {
        // No rule reads volatility.
        snapshot(series, None)
    }

    fn score(&self, series: &PriceSeries) -> MomentumScore {
        if series.len() < self.config.min_observations {
            return 0;
        }
        Self::points(&self.snapshot(series))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_min_observations_guard() {
        let scorer = TrendMomentum::default();
        assert_eq!(scorer.score(&rising(149)), 0);
        assert_eq!(scorer.score(&rising(150)), 8);
    }

    #[test]
    fn test_flat_series_scores_zero() {
        assert_eq!(TrendMomentum::default().score(&flat(300)), 0);
    }

    #[test]
    fn test_falling_series_scores_zero() {
        assert_eq!(TrendMomentum::default().score(&falling(300)), 0);
    }

    #[test]
    fn test_snapshot_skips_volatility() {
        let snap = TrendMomentum::default().snapshot(&rising(300));
        assert_eq!(snap.observations, 300);
        assert!(snap.sma_20.is_some());
        assert_eq!(snap.volatility, None);
        assert_eq!(snap.volatility_mean, None);
    }

    #[test]
    fn test_partial_points() {
        let snap = MomentumSnapshot {
            close: Some(100.0),
            sma_20: Some(99.0),
            sma_60: Some(101.0),
            sma_120: None,
            return_3m: Some(0.01),
            return_6m: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(TrendMomentum::points(&snap), 1 + 2);
    }
}
