//! Run configuration, loadable from a TOML file and overridable from the
//! command line.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for a self-play run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of games to play
    pub games: u32,
    /// Search depth for the parametric agent
    pub depth: u8,
    /// Maximum plies per game before declaring a draw
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Oracle backend: `material` or a UCI engine command line
    pub oracle: String,
    /// Search depth requested from a UCI oracle
    pub oracle_depth: u8,
    /// Per-request oracle timeout in seconds
    pub oracle_timeout_secs: u64,
    /// Seed for reproducible agent randomness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Where Elo ratings persist between runs
    pub elo_path: String,
    /// Where the run report is written
    pub report_path: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            games: 10,
            depth: 3,
            max_moves: 200,
            alternate_colors: true,
            oracle: "material".to_string(),
            oracle_depth: 10,
            oracle_timeout_secs: 10,
            seed: None,
            elo_path: "selfplay_elo.json".to_string(),
            report_path: "selfplay_report.json".to_string(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}
