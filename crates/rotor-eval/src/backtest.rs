//! Monthly sector rotation backtest.
//!
//! At every evaluation date the backtest holds exactly one sector, the one
//! with the highest momentum score computed from data dated on or before
//! that date, and books its realized return from the previous month-end
//! close to the close at that date.

use chrono::Months;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::month_end;
use crate::metrics::{MONTHS_PER_YEAR, PerformanceSummary, equity_curve};
use rotor_traits::{Date, MomentumScore, PriceSeries, Scorer, Sector, Universe};

/// How the held sector is chosen each period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Highest momentum score as of the evaluation date.
    #[default]
    Momentum,
    /// Highest realized return over the period itself.
    ///
    /// Uses the outcome it is measuring and is only meaningful as an upper
    /// bound to compare [`Selection::Momentum`] against.
    Hindsight,
}

/// Backtesting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Selection rule
    pub selection: Selection,
    /// Months between the base close and each evaluation date
    pub holding_months: u32,
    /// Periods per year used to annualize metrics
    pub periods_per_year: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            selection: Selection::Momentum,
            holding_months: 1,
            periods_per_year: MONTHS_PER_YEAR,
        }
    }
}

/// Outcome of one evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPeriod {
    /// Evaluation date (month end)
    pub date: Date,
    /// Sector held for the period, `None` when nothing qualified
    pub selected: Option<Sector>,
    /// Score of the held sector as of `date`
    pub score: MomentumScore,
    /// Number of sectors eligible for selection
    pub candidates: usize,
    /// Realized return booked for the period
    pub period_return: f64,
    /// Equity after the period
    pub equity: f64,
}

/// Backtesting results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Selection rule used
    pub selection: Selection,
    /// Per-period records
    pub periods: Vec<RotationPeriod>,
    /// Period returns
    pub returns: Vec<f64>,
    /// Cumulative equity, one value per period
    pub equity_curve: Vec<f64>,
    /// Summary metrics
    pub summary: PerformanceSummary,
}

impl BacktestResult {
    /// Final equity value, 1.0 for an empty backtest.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.equity_curve.last().copied().unwrap_or(1.0)
    }

    /// Whether any period held a sector.
    #[must_use]
    pub fn has_selections(&self) -> bool {
        self.periods.iter().any(|p| p.selected.is_some())
    }

    /// How many periods each sector was held, in first-held order.
    #[must_use]
    pub fn holdings(&self) -> Vec<(Sector, usize)> {
        let mut counts: Vec<(Sector, usize)> = Vec::new();
        for sector in self.periods.iter().filter_map(|p| p.selected.as_ref()) {
            match counts.iter_mut().find(|(s, _)| s == sector) {
                Some((_, n)) => *n += 1,
                None => counts.push((sector.clone(), 1)),
            }
        }
        counts
    }
}

/// A sector eligible at one evaluation date.
struct Candidate<'a> {
    sector: &'a Sector,
    series: &'a PriceSeries,
}

/// Rotation backtesting engine.
#[derive(Debug, Default)]
pub struct RotationBacktest {
    /// Configuration
    config: BacktestConfig,
}

impl RotationBacktest {
    /// Create a new backtest with configuration.
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Run the backtest.
    ///
    /// # Arguments
    ///
    /// * `universe` - Sectors and their price histories, in tie-break order
    /// * `dates` - Evaluation dates; sorted and deduplicated before use
    /// * `scorer` - Momentum scheme used for selection
    ///
    /// Never fails: unavailable series are never eligible and periods with
    /// no qualifying sector book a zero return.
    pub fn run(&self, universe: &Universe, dates: &[Date], scorer: &dyn Scorer) -> BacktestResult {
        let mut dates = dates.to_vec();
        dates.sort_unstable();
        dates.dedup();

        let mut periods = Vec::with_capacity(dates.len());
        let mut returns = Vec::with_capacity(dates.len());
        let mut equity = 1.0;

        for date in dates {
            let candidates = Self::candidates(universe, date);
            let pick = match self.config.selection {
                Selection::Momentum => Self::select_by_score(&candidates, date, scorer),
                Selection::Hindsight => self.select_by_return(&candidates, date, scorer),
            };

            let (selected, score, period_return) = match pick {
                Some((idx, score)) => {
                    let candidate = &candidates[idx];
                    let ret = self.window_return(candidate.series, date).unwrap_or(0.0);
                    (Some(candidate.sector.clone()), score, ret)
                }
                None => (None, 0, 0.0),
            };

            equity *= 1.0 + period_return;
            debug!(
                "{date}: {} (score {score}, {} candidates) return {period_return:+.4}",
                selected.as_ref().map_or("cash", |s| s.label.as_str()),
                candidates.len(),
            );

            returns.push(period_return);
            periods.push(RotationPeriod {
                date,
                selected,
                score,
                candidates: candidates.len(),
                period_return,
                equity,
            });
        }

        BacktestResult {
            selection: self.config.selection,
            equity_curve: equity_curve(&returns),
            summary: PerformanceSummary::from_returns(&returns, self.config.periods_per_year),
            returns,
            periods,
        }
    }

    /// Sectors with data covering `date`: at least one observation on or
    /// before it and a last observation no earlier than it.
    fn candidates(universe: &Universe, date: Date) -> Vec<Candidate<'_>> {
        universe
            .available()
            .filter(|(_, series)| {
                series.observations_through(date) > 0
                    && series.last_date().is_some_and(|last| last >= date)
            })
            .map(|(sector, series)| Candidate { sector, series })
            .collect()
    }

    /// Index and score of the strictly highest positive score; the first
    /// sector wins ties.
    fn select_by_score(
        candidates: &[Candidate<'_>],
        date: Date,
        scorer: &dyn Scorer,
    ) -> Option<(usize, MomentumScore)> {
        let mut best: Option<(usize, MomentumScore)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let score = scorer.score(&candidate.series.truncate_to(date));
            if score > 0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best
    }

    /// Index and score of the sector with the strictly highest realized
    /// return over the period; the first sector wins ties.
    fn select_by_return(
        &self,
        candidates: &[Candidate<'_>],
        date: Date,
        scorer: &dyn Scorer,
    ) -> Option<(usize, MomentumScore)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let Some(ret) = self.window_return(candidate.series, date) else {
                continue;
            };
            if best.is_none_or(|(_, top)| ret > top) {
                best = Some((idx, ret));
            }
        }
        best.map(|(idx, _)| (idx, scorer.score(&candidates[idx].series.truncate_to(date))))
    }

    /// Return from the last close on or before the month end
    /// `holding_months` before `date` to the last close on or before `date`.
    ///
    /// `None` when either close is missing or the result is not finite.
    fn window_return(&self, series: &PriceSeries, date: Date) -> Option<f64> {
        let prior = date.checked_sub_months(Months::new(self.config.holding_months))?;
        let base_date = month_end(prior);
        let base = series.close_on_or_before(base_date)?;
        let end = series.close_on_or_before(date)?;
        let ret = end / base - 1.0;
        ret.is_finite().then_some(ret)
    }
}
