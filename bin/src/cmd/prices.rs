//! Price chart command implementation.

use anyhow::{Result, bail};
use polars::prelude::*;
use rotor_data::load;
use rotor_signals::indicators::rolling_sma;
use rotor_traits::{Date, RotorError};
use serde::Serialize;

use crate::config::Config;
use crate::data::Source;
use crate::render::{OutputFormat, header, line_chart, pct, print_json};

#[derive(Serialize)]
struct PriceRow {
    date: Date,
    close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sma_20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sma_60: Option<f64>,
}

/// Chart the closing prices of one sector.
pub(crate) async fn show_prices(
    config: &Config,
    query: &str,
    with_ma: bool,
    tail: usize,
    format: OutputFormat,
) -> Result<()> {
    let sectors = config.sectors();
    let Some(sector) = sectors.iter().find(|s| s.matches(query)) else {
        return Err(RotorError::SectorNotFound(query.to_string()).into());
    };

    let source = Source::from_config(&config.provider)?;
    let Some(series) = load(&source, &sector.ticker, config.start_date).await else {
        bail!("no price data available for {sector}");
    };

    let closes = series.closes();
    let (sma_20, sma_60) = if with_ma {
        (rolling_sma(closes, 20), rolling_sma(closes, 60))
    } else {
        (vec![None; closes.len()], vec![None; closes.len()])
    };

    if format == OutputFormat::Json {
        let rows: Vec<PriceRow> = series
            .points()
            .zip(sma_20.iter().zip(&sma_60))
            .map(|(point, (s20, s60))| PriceRow {
                date: point.date,
                close: point.close,
                sma_20: *s20,
                sma_60: *s60,
            })
            .collect();
        return print_json(&rows);
    }

    header(&format!("{sector} Price"));

    if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
        println!("Range:   {first} to {last} ({} observations)", series.len());
    }
    if let (Some(&first), Some(last)) = (closes.first(), series.last_close()) {
        println!("Close:   {last:.2} ({} since start)", pct(last / first - 1.0));
    }
    println!();

    let close_values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    let mut lines: Vec<(char, &[Option<f64>])> = vec![('·', close_values.as_slice())];
    if with_ma {
        lines.push(('2', sma_20.as_slice()));
        lines.push(('6', sma_60.as_slice()));
    }
    print!("{}", line_chart(&lines, 16, 72));
    if with_ma {
        println!("{:>12}· close   2 SMA20   6 SMA60", "");
    }
    println!();

    let start = series.len().saturating_sub(tail);
    let mut frame = df! {
        "date" => &series.dates()[start..],
        "close" => &closes[start..],
    }?;
    if with_ma {
        frame.with_column(Series::new("sma_20".into(), &sma_20[start..]))?;
        frame.with_column(Series::new("sma_60".into(), &sma_60[start..]))?;
    }
    println!("{frame}\n");
    Ok(())
}
