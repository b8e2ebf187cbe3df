//! Load saved price files, rank sectors and run the rotation backtest.

use chrono::Days;
use rotor::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

/// `n` daily closes from 2020-01-01.
fn series(n: usize, price: impl Fn(usize) -> f64) -> PriceSeries {
    let start = date(2020, 1, 1);
    (0..n)
        .map(|i| PricePoint::new(start + Days::new(i as u64), price(i)))
        .collect()
}

async fn write_fixtures(loader: &JsonFileLoader) {
    loader.store("RIS", &series(400, |i| 100.0 * 1.002_f64.powi(i as i32))).await.unwrap();
    loader.store("FLT", &series(400, |_| 50.0)).await.unwrap();
    loader.store("FAL", &series(400, |i| 80.0 * 0.998_f64.powi(i as i32))).await.unwrap();
}

fn sectors() -> Vec<Sector> {
    vec![
        Sector::new("Flat", "FLT"),
        Sector::new("Missing", "MIS"),
        Sector::new("Rising", "RIS"),
        Sector::new("Falling", "FAL"),
    ]
}

#[tokio::test]
async fn test_rank_and_rotate_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let files = JsonFileLoader::new(dir.path());
    write_fixtures(&files).await;

    let start = date(2020, 1, 1);
    let loader = PriceCache::new(files);
    let universe = load_universe(&loader, &sectors(), start).await;

    assert_eq!(universe.len(), 4);
    assert_eq!(universe.available().count(), 3);
    assert!(universe.find("MIS").unwrap().series.is_none());

    let scorer = create_scorer(DEFAULT_SCHEME).unwrap();
    let table = ScoreTable::compute(&universe, scorer.as_ref());
    let leader = table.leader().unwrap();
    assert_eq!(leader.sector.ticker, "RIS");
    assert!(leader.score >= 8);
    assert!(!table.all_zero());

    let dates = evaluation_dates(&universe, start);
    assert_eq!(dates.first(), Some(&date(2020, 1, 31)));
    assert_eq!(dates.last(), Some(&date(2021, 1, 31)));

    let result = RotationBacktest::default().run(&universe, &dates, scorer.as_ref());
    assert_eq!(result.periods.len(), dates.len());
    for period in &result.periods {
        if period.date < date(2020, 5, 31) {
            // Not enough history for any sector to score yet.
            assert!(period.selected.is_none());
            assert_eq!(period.period_return, 0.0);
        } else {
            assert_eq!(period.selected.as_ref().unwrap().ticker, "RIS");
            assert!(period.period_return > 0.0);
        }
    }
    assert!(result.final_value() > 1.0);
    assert!(result.summary.cagr > 0.0);
    assert_eq!(result.summary.max_drawdown, 0.0);

    let hindsight = RotationBacktest::new(BacktestConfig {
        selection: Selection::Hindsight,
        ..BacktestConfig::default()
    })
    .run(&universe, &dates, scorer.as_ref());
    assert!(hindsight.final_value() >= result.final_value());
}

#[tokio::test]
async fn test_empty_directory_degrades_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let loader = JsonFileLoader::new(dir.path());
    let universe = load_universe(&loader, &sectors(), date(2020, 1, 1)).await;

    assert_eq!(universe.len(), 4);
    assert_eq!(universe.available().count(), 0);

    let scorer = create_scorer("trend").unwrap();
    let table = ScoreTable::compute(&universe, scorer.as_ref());
    assert!(table.all_zero());
    assert!(table.leader().is_none());

    let dates = evaluation_dates(&universe, date(2020, 1, 1));
    assert!(dates.is_empty());
    let result = RotationBacktest::default().run(&universe, &dates, scorer.as_ref());
    assert!(result.periods.is_empty());
    assert_eq!(result.final_value(), 1.0);
    assert_eq!(result.summary.cagr, 0.0);
}
