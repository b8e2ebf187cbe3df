//! Sector listing command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::render::header;

/// List the configured sector to ticker mapping.
pub(crate) fn list_sectors(config: &Config) -> Result<()> {
    header("Configured Sectors");

    let sectors = config.sectors();
    let width = sectors.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
    for (i, sector) in sectors.iter().enumerate() {
        println!("  {:>2}. {:<width$}  {}", i + 1, sector.label, sector.ticker);
    }

    println!("\nHistory from {}", config.start_date);
    match &config.provider.data_dir {
        Some(dir) => println!("Prices from files in {}", dir.display()),
        None => println!("Prices from the FMP API"),
    }
    println!();
    Ok(())
}
