#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rotor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for the rotor sector rotation toolkit.
//!
//! This crate provides the foundational abstractions shared by the scoring,
//! evaluation and data crates: price series, the sector universe, the
//! [`Scorer`] trait and the common error type.

/// The version of the rotor-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod scorer;
pub mod types;

// Re-exports
pub use error::{Result, RotorError};
pub use scorer::{MomentumSnapshot, Scorer, SignalLabel};
pub use types::{
    CE_TO_UNIX_EPOCH_DAYS, Date, MomentumScore, PricePoint, PriceSeries, Sector, Symbol, Universe,
    UniverseEntry,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
