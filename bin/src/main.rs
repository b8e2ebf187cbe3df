//! Rotor CLI binary.
//!
//! Scores a basket of sector ETFs by momentum, charts their prices and
//! backtests a hold-the-leader monthly rotation.

mod cmd;
mod config;
mod data;
mod render;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::Config;
use render::OutputFormat;

/// Default config file, read when present.
const DEFAULT_CONFIG: &str = "rotor.toml";

#[derive(Parser)]
#[command(name = "rotor")]
#[command(about = "Sector ETF momentum scores and monthly rotation backtests", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file [default: rotor.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// First date of price history (YYYY-MM-DD)
    #[arg(long, global = true)]
    start: Option<String>,

    /// Read prices from <DIR>/<TICKER>.json instead of the API
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured sectors and tickers
    Sectors,

    /// List available scoring schemes
    Schemes,

    /// Rank sectors by momentum score
    Scores {
        /// Scoring scheme (overrides config)
        #[arg(short, long)]
        scheme: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Chart one sector's closing prices
    Prices {
        /// Sector label or ticker
        sector: String,

        /// Overlay 20 and 60 period moving averages
        #[arg(long)]
        ma: bool,

        /// Rows in the trailing price table
        #[arg(long, default_value = "10")]
        tail: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Backtest holding the top-scoring sector each month
    Backtest {
        /// Scoring scheme (overrides config)
        #[arg(short, long)]
        scheme: Option<String>,

        /// Select by each month's realized return instead (benchmark only)
        #[arg(long)]
        hindsight: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Save prices as JSON files for offline use
    Download {
        /// Output directory
        #[arg(short, long, default_value = "prices")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Sectors => cmd::sectors::list_sectors(&config)?,
        Commands::Schemes => cmd::schemes::list_schemes(&config)?,
        Commands::Scores { scheme, format } => {
            cmd::scores::show_scores(&config, scheme.as_deref(), format).await?;
        }
        Commands::Prices {
            sector,
            ma,
            tail,
            format,
        } => {
            cmd::prices::show_prices(&config, &sector, ma, tail, format).await?;
        }
        Commands::Backtest {
            scheme,
            hindsight,
            format,
        } => {
            cmd::backtest::run_backtest(&config, scheme.as_deref(), hindsight, format).await?;
        }
        Commands::Download { out } => cmd::download::download(&config, &out).await?,
    }

    Ok(())
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::load_or_default(&path, cli.config.is_some())?;

    if let Some(start) = &cli.start {
        config.start_date = data::parse_date(start)?;
    }
    if let Some(dir) = &cli.data_dir {
        config.provider.data_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}
