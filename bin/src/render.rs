//! Terminal rendering: headers, ASCII charts and JSON output.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format shared by the reporting subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a boxed section title.
pub(crate) fn header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print any serializable value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Signed percentage with two decimals.
pub(crate) fn pct(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

/// Horizontal bar chart, one labelled bar per item scaled against `max`.
pub(crate) fn bar_chart(items: &[(String, f64)], max: f64, width: usize) -> String {
    let label_width = items.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in items {
        let filled = if max > 0.0 && value.is_finite() {
            ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{label:<label_width$} │{}{} {value}\n",
            "█".repeat(filled),
            " ".repeat(width - filled),
        ));
    }
    out
}

/// Resample `values` to `width` points by taking the last value in each bucket.
fn resample(values: &[Option<f64>], width: usize) -> Vec<Option<f64>> {
    if values.len() <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|col| {
            let end = ((col + 1) * values.len()).div_ceil(width).min(values.len());
            values[end - 1]
        })
        .collect()
}

/// Plot one or more series on a shared y-axis.
///
/// Each series is drawn with its marker; later series overwrite earlier ones
/// where they collide. Missing values leave gaps.
pub(crate) fn line_chart(series: &[(char, &[Option<f64>])], height: usize, width: usize) -> String {
    let height = height.max(2);
    let columns: Vec<(char, Vec<Option<f64>>)> = series
        .iter()
        .map(|(marker, values)| (*marker, resample(values, width)))
        .collect();

    let finite = columns
        .iter()
        .flat_map(|(_, v)| v.iter().flatten())
        .copied()
        .filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return "(no data)\n".to_string();
    }

    let cols = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let mut grid = vec![vec![' '; cols]; height];
    let span = hi - lo;
    for (marker, values) in &columns {
        for (col, value) in values.iter().enumerate() {
            let Some(v) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let level = if span > 0.0 {
                ((v - lo) / span * (height - 1) as f64).round() as usize
            } else {
                0
            };
            grid[height - 1 - level][col] = *marker;
        }
    }

    let mut out = String::new();
    for (row, line) in grid.iter().enumerate() {
        let axis = if row == 0 {
            format!("{hi:>10.2}")
        } else if row == height - 1 {
            format!("{lo:>10.2}")
        } else {
            " ".repeat(10)
        };
        out.push_str(&format!("{axis} ┤{}\n", line.iter().collect::<String>()));
    }
    out
}
