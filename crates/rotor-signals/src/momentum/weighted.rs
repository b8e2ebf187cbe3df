//! Weighted 0–10 momentum score.

use serde::{Deserialize, Serialize};

use super::{above, positive, snapshot};
use crate::indicators::VolatilityRegime;
use rotor_traits::{MomentumScore, MomentumSnapshot, PriceSeries, Scorer};

/// Configuration for the weighted momentum score.
///
/// Point values are awarded per satisfied rule; the maximum score is their
/// sum (10 with the defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedMomentumConfig {
    /// Series shorter than this score 0 (default: 130).
    pub min_observations: usize,
    /// Daily returns per rolling volatility sample (default: 60).
    pub volatility_window: usize,
    /// Points for a positive 3-month return.
    pub return_3m_points: u8,
    /// Points for a positive 6-month return.
    pub return_6m_points: u8,
    /// Points for a close above the 120-period average.
    pub trend_points: u8,
    /// Points for current volatility below its historical mean.
    pub calm_points: u8,
}

impl Default for WeightedMomentumConfig {
    fn default() -> Self {
        Self {
            min_observations: 130,
            volatility_window: 60,
            return_3m_points: 3,
            return_6m_points: 3,
            trend_points: 2,
            calm_points: 2,
        }
    }
}

/// Weighted momentum scheme.
///
/// Separates trend strength (3- and 6-month returns, price above the
/// 120-period average) from noise (volatility relative to its own history).
///
/// # Example
///
/// ```ignore
/// use rotor_signals::WeightedMomentum;
/// use rotor_traits::Scorer;
///
/// let scorer = WeightedMomentum::default();
/// let score = scorer.score(&series);
/// assert!(score <= scorer.max_score());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedMomentum {
    config: WeightedMomentumConfig,
}

impl WeightedMomentum {
    /// Create a scorer with the given configuration.
    #[must_use]
    pub const fn new(config: WeightedMomentumConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &WeightedMomentumConfig {
        &self.config
    }

    /// Points awarded for an already computed snapshot.
    #[must_use]
    pub fn points(&self, snap: &MomentumSnapshot) -> MomentumScore {
        let c = &self.config;
        let calm = VolatilityRegime {
            current: snap.volatility,
            mean: snap.volatility_mean,
        }
        .is_calm();

        [
            (positive(snap.return_3m), c.return_3m_points),
            (positive(snap.return_6m), c.return_6m_points),
            (above(snap.close, snap.sma_120), c.trend_points),
            (calm, c.calm_points),
        ]
        .into_iter()
        .filter(|(hit, _)| *hit)
        .fold(0u8, |acc, (_, pts)| acc.saturating_add(pts))
    }
}

impl Scorer for WeightedMomentum {
    fn name(&self) -> &str {
        "weighted"
    }

    fn min_observations(&self) -> usize {
        self.config.min_observations
    }

    fn max_score(&self) -> MomentumScore {
        let c = &self.config;
        c.return_3m_points
            .saturating_add(c.return_6m_points)
            .saturating_add(c.trend_points)
            .saturating_add(c.calm_points)
    }

    fn snapshot(&self, series: &PriceSeries) -> MomentumSnapshot {
        snapshot(series, Some(self.config.volatility_window))
    }

    fn score(&self, series: &PriceSeries) -> MomentumScore {
        if series.len() < self.min_observations() {
            return 0;
        }
        self.points(&self.snapshot(series))
    }
}
