//! Momentum scoring for rotor.
//!
//! This crate turns a daily price series into a bounded integer score:
//! - [`indicators`]: moving averages, trailing returns and volatility regime
//! - [`momentum`]: the scoring schemes themselves
//! - [`registry`]: discovery and construction of schemes by name
//!
//! # Example
//!
//! ```ignore
//! use rotor_signals::registry::create_scorer;
//!
//! let scorer = create_scorer("weighted")?;
//! let score = scorer.score(&series);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod indicators;
pub mod momentum;
pub mod registry;

// Re-export key types
pub use momentum::{TrendMomentum, TrendMomentumConfig, WeightedMomentum, WeightedMomentumConfig};
pub use registry::{DEFAULT_SCHEME, SchemeInfo, available_schemes, create_scorer};
