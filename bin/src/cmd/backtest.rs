//! Backtest command implementation.

use anyhow::Result;
use log::warn;
use polars::prelude::*;
use rotor_eval::{BacktestConfig, RotationBacktest, Selection, calendar::evaluation_dates};
use rotor_signals::create_scorer;

use crate::config::Config;
use crate::data::Source;
use crate::render::{OutputFormat, header, line_chart, pct, print_json};

/// Run the monthly rotation backtest over the configured sectors.
pub(crate) async fn run_backtest(
    config: &Config,
    scheme: Option<&str>,
    hindsight: bool,
    format: OutputFormat,
) -> Result<()> {
    let scorer = create_scorer(scheme.unwrap_or(&config.scheme))?;
    let source = Source::from_config(&config.provider)?;
    let universe = source.universe(&config.sectors(), config.start_date).await;
    let dates = evaluation_dates(&universe, config.start_date);

    let selection = if hindsight {
        Selection::Hindsight
    } else {
        Selection::Momentum
    };
    let backtest = RotationBacktest::new(BacktestConfig {
        selection,
        ..BacktestConfig::default()
    });
    let result = backtest.run(&universe, &dates, scorer.as_ref());

    if !result.has_selections() {
        warn!("no sector was held in any month under {}", scorer.name());
    }

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    header("Monthly Sector Rotation Backtest");

    println!("Scheme:     {}", scorer.name());
    if hindsight {
        println!("Selection:  hindsight (picks each month's best realized return; benchmark only)");
    } else {
        println!("Selection:  highest momentum score as of each month end");
    }

    let (Some(first), Some(last)) = (result.periods.first(), result.periods.last()) else {
        println!("\nNo evaluation dates: no sector has price data.\n");
        return Ok(());
    };
    println!("Period:     {} to {} ({} months)", first.date, last.date, result.periods.len());
    println!();

    if !result.has_selections() {
        println!("No sector was held in any month; check data availability.\n");
        return Ok(());
    }

    let summary = &result.summary;
    println!("Final value:   {:.4}", result.final_value());
    println!("Total return:  {}", pct(summary.total_return));
    println!("CAGR:          {}", pct(summary.cagr));
    println!("Max drawdown:  {}", pct(summary.max_drawdown));
    if let Some(vol) = summary.volatility {
        println!("Volatility:    {}", pct(vol));
    }
    if let Some(sharpe) = summary.sharpe_ratio {
        println!("Sharpe:        {sharpe:.2}");
    }
    if let Some(win_rate) = summary.win_rate {
        println!("Win rate:      {:.1}%", win_rate * 100.0);
    }
    println!();

    println!("Equity curve:");
    let curve: Vec<Option<f64>> = result.equity_curve.iter().copied().map(Some).collect();
    print!("{}", line_chart(&[('*', curve.as_slice())], 14, 72));
    println!();

    let holdings = result.holdings();
    if !holdings.is_empty() {
        println!("Months held:");
        for (sector, months) in &holdings {
            println!("  {:<30} {months}", sector.to_string());
        }
        println!();
    }

    let held: Vec<String> = result
        .periods
        .iter()
        .map(|p| p.selected.as_ref().map_or_else(|| "-".to_string(), |s| s.label.clone()))
        .collect();
    let frame = df! {
        "date" => result.periods.iter().map(|p| p.date).collect::<Vec<_>>(),
        "held" => held,
        "score" => result.periods.iter().map(|p| u32::from(p.score)).collect::<Vec<_>>(),
        "return" => result.returns.clone(),
        "equity" => result.equity_curve.clone(),
    }?;
    println!("{frame}\n");
    Ok(())
}
