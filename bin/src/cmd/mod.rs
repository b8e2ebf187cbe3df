//! CLI subcommand modules.
//!
//! This module contains the implementations for all rotor CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod download;
pub(crate) mod prices;
pub(crate) mod schemes;
pub(crate) mod scores;
pub(crate) mod sectors;
