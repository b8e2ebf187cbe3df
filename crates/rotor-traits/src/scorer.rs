//! Scorer trait for momentum scoring.
//!
//! A [`Scorer`] maps one price series to a small bounded integer. Scoring is
//! total: short, empty or numerically degenerate input degrades to a lower
//! score instead of an error, so callers can rank whole universes without
//! special-casing individual sectors.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{MomentumScore, PriceSeries};

/// Indicator values observed at the last point of a series.
///
/// Each value is `None` when it could not be computed (too little history,
/// a zero divisor or a non-finite result).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    /// Number of observations in the scored series.
    pub observations: usize,
    /// Latest closing price.
    pub close: Option<f64>,
    /// 20-period simple moving average.
    pub sma_20: Option<f64>,
    /// 60-period simple moving average.
    pub sma_60: Option<f64>,
    /// 120-period simple moving average.
    pub sma_120: Option<f64>,
    /// Return over the last 21 observations (about one month).
    pub return_1m: Option<f64>,
    /// Return over the last 63 observations (about three months).
    pub return_3m: Option<f64>,
    /// Return over the last 126 observations (about six months).
    pub return_6m: Option<f64>,
    /// Current rolling volatility of daily returns.
    pub volatility: Option<f64>,
    /// Mean of the rolling volatility over the whole series.
    pub volatility_mean: Option<f64>,
}

/// A momentum scoring scheme.
///
/// Implementations must be deterministic and must never panic on any input.
///
/// # Example
///
/// ```
/// use rotor_traits::{MomentumScore, MomentumSnapshot, PriceSeries, Scorer};
///
/// struct AlwaysOne;
///
/// impl Scorer for AlwaysOne {
///     fn name(&self) -> &str {
///         "always_one"
///     }
///
///     fn min_observations(&self) -> usize {
///         1
///     }
///
///     fn max_score(&self) -> MomentumScore {
///         1
///     }
///
///     fn snapshot(&self, series: &PriceSeries) -> MomentumSnapshot {
///         MomentumSnapshot {
///             observations: series.len(),
///             close: series.last_close(),
///             ..Default::default()
///         }
///     }
///
///     fn score(&self, series: &PriceSeries) -> MomentumScore {
///         u8::from(!series.is_empty())
///     }
/// }
///
/// assert_eq!(AlwaysOne.score_opt(None), 0);
/// ```
pub trait Scorer: Send + Sync {
    /// Returns the registry name of this scheme.
    fn name(&self) -> &str;

    /// Minimum number of observations below which the score is 0.
    fn min_observations(&self) -> usize;

    /// Highest score the scheme can award.
    fn max_score(&self) -> MomentumScore;

    /// Computes the indicator values the scheme looks at.
    fn snapshot(&self, series: &PriceSeries) -> MomentumSnapshot;

    /// Scores a series. Always within `0..=max_score()`.
    fn score(&self, series: &PriceSeries) -> MomentumScore;

    /// Scores a possibly unavailable series; `None` scores 0.
    fn score_opt(&self, series: Option<&PriceSeries>) -> MomentumScore {
        series.map_or(0, |s| self.score(s))
    }
}

/// Coarse reading of a score relative to its scheme's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SignalLabel {
    /// At least 70% of the maximum score.
    #[display("Strong")]
    Strong,
    /// At least 40% of the maximum score.
    #[display("Neutral")]
    Neutral,
    /// Below 40% of the maximum score.
    #[display("Weak")]
    Weak,
}

impl SignalLabel {
    /// Classify `score` out of `max_score`.
    #[must_use]
    pub fn from_score(score: MomentumScore, max_score: MomentumScore) -> Self {
        if max_score == 0 {
            return Self::Weak;
        }
        let ratio = f64::from(score) / f64::from(max_score);
        if ratio >= 0.7 {
            Self::Strong
        } else if ratio >= 0.4 {
            Self::Neutral
        } else {
            Self::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, PricePoint};

    struct CountScorer;

    impl Scorer for CountScorer {
        fn name(&self) -> &str {
            "count"
        }

        fn min_observations(&self) -> usize {
            2
        }

        fn max_score(&self) -> MomentumScore {
            5
        }

        fn snapshot(&self, series: &PriceSeries) -> MomentumSnapshot {
            MomentumSnapshot {
                observations: series.len(),
                close: series.last_close(),
                ..Default::default()
            }
        }

        fn score(&self, series: &PriceSeries) -> MomentumScore {
            if series.len() < self.min_observations() {
                0
            } else {
                series.len().min(5) as MomentumScore
            }
        }
    }

    #[test]
    fn test_score_opt_none_is_zero() {
        assert_eq!(CountScorer.score_opt(None), 0);
    }

    #[test]
    fn test_score_opt_delegates() {
        let d = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let series: PriceSeries = (0..3)
            .map(|i| PricePoint::new(d + chrono::Days::new(i), 1.0))
            .collect();
        assert_eq!(CountScorer.score_opt(Some(&series)), 3);
        assert_eq!(CountScorer.snapshot(&series).observations, 3);
    }

    #[test]
    fn test_signal_label_thresholds() {
        assert_eq!(SignalLabel::from_score(10, 10), SignalLabel::Strong);
        assert_eq!(SignalLabel::from_score(7, 10), SignalLabel::Strong);
        assert_eq!(SignalLabel::from_score(6, 10), SignalLabel::Neutral);
        assert_eq!(SignalLabel::from_score(4, 10), SignalLabel::Neutral);
        assert_eq!(SignalLabel::from_score(3, 10), SignalLabel::Weak);
        assert_eq!(SignalLabel::from_score(0, 0), SignalLabel::Weak);
        assert_eq!(SignalLabel::Strong.to_string(), "Strong");
    }

    #[test]
    fn test_scorer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Scorer>();
    }
}
