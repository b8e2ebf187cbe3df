//! Scheme registry for discovering and constructing momentum scorers.

use serde::Serialize;

use crate::momentum::{TrendMomentum, WeightedMomentum};
use rotor_traits::{MomentumScore, Result, RotorError, Scorer};

/// Name of the scheme used when none is configured.
pub const DEFAULT_SCHEME: &str = "weighted";

/// Metadata about a scoring scheme.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeInfo {
    /// Unique identifier for the scheme
    pub name: &'static str,

    /// Alternative names accepted by [`create_scorer`]
    pub aliases: &'static [&'static str],

    /// Human-readable description
    pub description: &'static str,

    /// Highest attainable score
    pub max_score: MomentumScore,

    /// Observations required before any points are awarded
    pub min_observations: usize,
}

/// Get information about all available schemes.
#[must_use]
pub fn available_schemes() -> Vec<SchemeInfo> {
    let weighted = WeightedMomentum::default();
    let trend = TrendMomentum::default();
    vec![
        SchemeInfo {
            name: "weighted",
            aliases: &["default", "canonical"],
            description: "3m/6m returns (+3 each), close above SMA120 (+2), calm volatility (+2)",
            max_score: weighted.max_score(),
            min_observations: weighted.min_observations(),
        },
        SchemeInfo {
            name: "trend",
            aliases: &["ma", "legacy"],
            description: "close above SMA20/60/120 (+1 each), 3m return (+2), 6m return (+3)",
            max_score: trend.max_score(),
            min_observations: trend.min_observations(),
        },
    ]
}

/// Get information about a scheme by name or alias.
#[must_use]
pub fn get_scheme_info(name: &str) -> Option<SchemeInfo> {
    let name = name.trim().to_lowercase();
    available_schemes()
        .into_iter()
        .find(|info| info.name == name || info.aliases.contains(&name.as_str()))
}

/// Construct a scorer by name or alias with its default configuration.
///
/// # Errors
///
/// Returns [`RotorError::SchemeNotFound`] for unknown names.
pub fn create_scorer(name: &str) -> Result<Box<dyn Scorer>> {
    match get_scheme_info(name).map(|info| info.name) {
        Some("weighted") => Ok(Box::new(WeightedMomentum::default())),
        Some("trend") => Ok(Box::new(TrendMomentum::default())),
        _ => Err(RotorError::SchemeNotFound(name.to_string())),
    }
}
