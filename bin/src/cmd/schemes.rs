//! Scheme listing command implementation.

use anyhow::Result;
use rotor_signals::{available_schemes, registry::get_scheme_info};

use crate::config::Config;
use crate::render::header;

/// List scoring schemes, marking the configured one.
pub(crate) fn list_schemes(config: &Config) -> Result<()> {
    header("Scoring Schemes");

    let active = get_scheme_info(&config.scheme).map(|info| info.name);
    for info in available_schemes() {
        let marker = if Some(info.name) == active { "*" } else { " " };
        println!(
            "{marker} {:10} 0-{:<3} min {} obs  {}",
            info.name, info.max_score, info.min_observations, info.description
        );
        if !info.aliases.is_empty() {
            println!("  {:10} aliases: {}", "", info.aliases.join(", "));
        }
    }
    println!("\n* configured scheme\n");
    Ok(())
}
