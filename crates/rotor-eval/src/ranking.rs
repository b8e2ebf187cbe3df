//! Ranked momentum score tables.

use polars::prelude::*;
use serde::Serialize;

use rotor_traits::{MomentumScore, MomentumSnapshot, Result, Scorer, Sector, SignalLabel, Universe};

/// One sector's score as of its latest observation.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    /// The sector.
    pub sector: Sector,
    /// Momentum score, 0 when data is unavailable.
    pub score: MomentumScore,
    /// Coarse reading of the score.
    pub label: SignalLabel,
    /// Whether the sector had price data at all.
    pub available: bool,
    /// Indicator values behind the score.
    pub snapshot: MomentumSnapshot,
}

/// Sectors ranked by momentum score, highest first.
///
/// Sectors with equal scores keep their universe order.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreTable {
    scheme: String,
    max_score: MomentumScore,
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// Score every sector in `universe` on its full history.
    pub fn compute(universe: &Universe, scorer: &dyn Scorer) -> Self {
        let max_score = scorer.max_score();
        let mut rows: Vec<ScoreRow> = universe
            .iter()
            .map(|entry| {
                let series = entry.series.as_ref();
                let score = scorer.score_opt(series);
                ScoreRow {
                    sector: entry.sector.clone(),
                    score,
                    label: SignalLabel::from_score(score, max_score),
                    available: series.is_some(),
                    snapshot: series.map(|s| scorer.snapshot(s)).unwrap_or_default(),
                }
            })
            .collect();
        // sort_by is stable, so ties keep universe order
        rows.sort_by(|a, b| b.score.cmp(&a.score));

        Self {
            scheme: scorer.name().to_string(),
            max_score,
            rows,
        }
    }

    /// Name of the scheme that produced the scores.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Highest attainable score under the scheme.
    pub const fn max_score(&self) -> MomentumScore {
        self.max_score
    }

    /// Rows, highest score first.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// The top-ranked sector, if any scored above zero.
    pub fn leader(&self) -> Option<&ScoreRow> {
        self.rows.first().filter(|row| row.score > 0)
    }

    /// Whether every sector scored zero.
    pub fn all_zero(&self) -> bool {
        self.rows.iter().all(|row| row.score == 0)
    }

    /// Render the table as a DataFrame.
    ///
    /// # Errors
    ///
    /// Returns an error if polars fails to build the frame.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let sectors: Vec<&str> = self.rows.iter().map(|r| r.sector.label.as_str()).collect();
        let tickers: Vec<&str> = self.rows.iter().map(|r| r.sector.ticker.as_str()).collect();
        let scores: Vec<u32> = self.rows.iter().map(|r| u32::from(r.score)).collect();
        let labels: Vec<String> = self.rows.iter().map(|r| r.label.to_string()).collect();
        let ret_3m: Vec<Option<f64>> = self.rows.iter().map(|r| r.snapshot.return_3m).collect();
        let ret_6m: Vec<Option<f64>> = self.rows.iter().map(|r| r.snapshot.return_6m).collect();

        let frame = df! {
            "sector" => sectors,
            "ticker" => tickers,
            "score" => scores,
            "signal" => labels,
            "return_3m" => ret_3m,
            "return_6m" => ret_6m,
        }?;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rotor_signals::WeightedMomentum;
    use rotor_traits::{Date, PricePoint, PriceSeries};

    fn series(n: usize, growth: f64) -> PriceSeries {
        let start = Date::from_ymd_opt(2020, 1, 1).unwrap();
        (0..n)
            .map(|i| PricePoint::new(start + Days::new(i as u64), 100.0 * growth.powi(i as i32)))
            .collect()
    }

    fn universe() -> Universe {
        Universe::new()
            .with(Sector::new("Flat", "FLT"), Some(series(200, 1.0)))
            .with(Sector::new("Missing", "MIS"), None)
            .with(Sector::new("Rising", "RIS"), Some(series(200, 1.01)))
            .with(Sector::new("Short", "SHT"), Some(series(50, 1.01)))
    }

    #[test]
    fn test_rows_sorted_descending() {
        let table = ScoreTable::compute(&universe(), &WeightedMomentum::default());

        assert_eq!(table.scheme(), "weighted");
        assert_eq!(table.max_score(), 10);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].sector.ticker, "RIS");
        assert_eq!(table.rows()[0].label, SignalLabel::Strong);
        for pair in table.rows().windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_universe_order() {
        let table = ScoreTable::compute(&universe(), &WeightedMomentum::default());
        let zero: Vec<&str> = table
            .rows()
            .iter()
            .filter(|r| r.score == 0)
            .map(|r| r.sector.ticker.as_str())
            .collect();
        assert_eq!(zero, ["FLT", "MIS", "SHT"]);
    }

    #[test]
    fn test_missing_sector_row() {
        let table = ScoreTable::compute(&universe(), &WeightedMomentum::default());
        let missing = table.rows().iter().find(|r| r.sector.ticker == "MIS").unwrap();
        assert!(!missing.available);
        assert_eq!(missing.score, 0);
        assert_eq!(missing.label, SignalLabel::Weak);
        assert_eq!(missing.snapshot, MomentumSnapshot::default());
    }

    #[test]
    fn test_leader_and_all_zero() {
        let table = ScoreTable::compute(&universe(), &WeightedMomentum::default());
        assert_eq!(table.leader().unwrap().sector.ticker, "RIS");
        assert!(!table.all_zero());

        let dull = Universe::new()
            .with(Sector::new("Flat", "FLT"), Some(series(200, 1.0)))
            .with(Sector::new("Missing", "MIS"), None);
        let table = ScoreTable::compute(&dull, &WeightedMomentum::default());
        assert!(table.all_zero());
        assert!(table.leader().is_none());
    }

    #[test]
    fn test_to_frame() {
        let table = ScoreTable::compute(&universe(), &WeightedMomentum::default());
        let frame = table.to_frame().unwrap();
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.width(), 6);
        assert!(frame.column("signal").is_ok());
    }
}
