//! Rotation backtesting and evaluation for rotor.
//!
//! This crate provides the tools that sit between scoring and presentation:
//! - Month-end evaluation calendars
//! - A single-holding monthly rotation backtest
//! - Performance metrics (CAGR, maximum drawdown, Sharpe, win rate)
//! - Ranked score tables for a sector universe
//!
//! # Example
//!
//! ```rust,ignore
//! use rotor_eval::{RotationBacktest, BacktestConfig, calendar};
//! use rotor_signals::WeightedMomentum;
//!
//! let dates = calendar::evaluation_dates(&universe, start);
//! let result = RotationBacktest::new(BacktestConfig::default())
//!     .run(&universe, &dates, &WeightedMomentum::default());
//! println!("CAGR: {:.2}%", result.summary.cagr * 100.0);
//! ```

pub mod backtest;
pub mod calendar;
pub mod metrics;
pub mod ranking;

// Re-export main types
pub use backtest::{BacktestConfig, BacktestResult, RotationBacktest, RotationPeriod, Selection};
pub use metrics::{PerformanceSummary, cagr, equity_curve, max_drawdown};
pub use ranking::{ScoreRow, ScoreTable};
