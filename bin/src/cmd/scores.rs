//! Score ranking command implementation.

use anyhow::Result;
use log::warn;
use rotor_eval::ScoreTable;
use rotor_signals::create_scorer;
use rotor_traits::Date;
use serde::Serialize;

use crate::config::Config;
use crate::data::Source;
use crate::render::{OutputFormat, bar_chart, header, print_json};

#[derive(Serialize)]
struct ScoresReport<'a> {
    as_of: Option<Date>,
    all_zero: bool,
    #[serde(flatten)]
    table: &'a ScoreTable,
}

/// Rank every configured sector by its latest momentum score.
pub(crate) async fn show_scores(
    config: &Config,
    scheme: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let scorer = create_scorer(scheme.unwrap_or(&config.scheme))?;
    let source = Source::from_config(&config.provider)?;
    let universe = source.universe(&config.sectors(), config.start_date).await;
    let table = ScoreTable::compute(&universe, scorer.as_ref());

    if table.all_zero() {
        warn!("every sector scored 0 under {}", table.scheme());
    }

    if format == OutputFormat::Json {
        return print_json(&ScoresReport {
            as_of: universe.latest_date(),
            all_zero: table.all_zero(),
            table: &table,
        });
    }

    header("Sector Momentum Scores");

    if table.all_zero() {
        println!("No sector has a positive momentum score; check data availability.\n");
        return Ok(());
    }

    println!("Scheme:  {} (0-{})", table.scheme(), table.max_score());
    if let Some(date) = universe.latest_date() {
        println!("As of:   {date}");
    }
    println!();
    println!("{}", table.to_frame()?);
    println!();

    let bars: Vec<(String, f64)> = table
        .rows()
        .iter()
        .map(|row| (row.sector.label.clone(), f64::from(row.score)))
        .collect();
    print!("{}", bar_chart(&bars, f64::from(table.max_score()), 40));

    let missing: Vec<String> = table
        .rows()
        .iter()
        .filter(|row| !row.available)
        .map(|row| row.sector.to_string())
        .collect();
    if !missing.is_empty() {
        println!("\nNo data: {}", missing.join(", "));
    }

    if let Some(leader) = table.leader() {
        println!(
            "\nLeader: {} with {}/{} ({})\n",
            leader.sector,
            leader.score,
            table.max_score(),
            leader.label
        );
    }
    Ok(())
}
