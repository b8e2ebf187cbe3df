//! Price snapshot command implementation.

use std::path::Path;

use anyhow::Result;
use rotor_data::{JsonFileLoader, load};

use crate::config::Config;
use crate::data::Source;
use crate::render::header;

/// Save every configured sector's prices as JSON files for offline runs.
pub(crate) async fn download(config: &Config, out: &Path) -> Result<()> {
    header("Download Prices");

    let source = Source::from_config(&config.provider)?;
    let sink = JsonFileLoader::new(out);

    let mut saved = 0;
    for sector in config.sectors() {
        match load(&source, &sector.ticker, config.start_date).await {
            Some(series) => {
                let path = sink.store(&sector.ticker, &series).await?;
                println!("  {:<30} {:>6} rows -> {}", sector.to_string(), series.len(), path.display());
                saved += 1;
            }
            None => println!("  {:<30} unavailable", sector.to_string()),
        }
    }

    println!("\nSaved {saved} series to {}", out.display());
    println!("Use --data-dir {} to run offline.\n", out.display());
    Ok(())
}
