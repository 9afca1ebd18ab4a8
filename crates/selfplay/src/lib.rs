//! Self-play runner for the learning agents.
//!
//! This crate provides infrastructure for:
//! - Running learning games between two agents against an oracle
//! - Tracking Elo ratings across runs
//! - Generating reports with per-game quality metrics
//!
//! # Usage
//!
//! ```bash
//! # Train the parametric agent against the tabular one
//! cargo run -p selfplay -- run parametric tabular --games 100
//!
//! # Show the current ratings
//! cargo run -p selfplay -- leaderboard
//! ```

mod config;
mod elo;
mod orchestrator;
mod results;

pub use config::*;
pub use elo::*;
pub use orchestrator::*;
pub use results::*;
