//! Run results storage and reporting

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;

/// Complete results of one self-play run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name/description of the run
    pub name: String,
    /// Participating agents
    pub participants: Vec<String>,
    /// Per-game rows in play order
    pub games: Vec<GameRow>,
    /// Configuration used
    pub config: RunConfig,
}

/// A single game's summary row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRow {
    /// 1-based game number
    pub game: u32,
    pub white: String,
    pub black: String,
    /// `1-0`, `0-1`, or `1/2-1/2`
    pub outcome: String,
    pub moves: u32,
    /// Average centipawn loss; `None` when the side never moved
    pub white_acpl: Option<f64>,
    pub black_acpl: Option<f64>,
    /// Ratings after this game
    pub white_elo: f64,
    pub black_elo: f64,
    pub oracle_ok: bool,
    pub illegal_moves: u32,
}

impl RunReport {
    pub fn new(name: &str, participants: Vec<String>, config: RunConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            games: Vec::new(),
            config,
        }
    }

    pub fn add_game(&mut self, row: GameRow) {
        self.games.push(row);
    }

    /// Save the report to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load a report from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Score over the whole run from the first participant's perspective
    pub fn score_for_first(&self) -> f64 {
        let first = match self.participants.first() {
            Some(name) => name,
            None => return 0.5,
        };
        if self.games.is_empty() {
            return 0.5;
        }
        let total: f64 = self
            .games
            .iter()
            .map(|row| {
                let white_score = match row.outcome.as_str() {
                    "1-0" => 1.0,
                    "0-1" => 0.0,
                    _ => 0.5,
                };
                if &row.white == first {
                    white_score
                } else {
                    1.0 - white_score
                }
            })
            .sum();
        total / self.games.len() as f64
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Run: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Participants: {}\n",
            self.participants.join(", ")
        ));
        report.push_str(&format!(
            "Config: {} games, depth {}, oracle {}\n\n",
            self.config.games, self.config.depth, self.config.oracle
        ));

        report.push_str(&format!(
            "{:>4} {:<15} {:<15} {:>7} {:>6} {:>8} {:>8}\n",
            "#", "White", "Black", "Result", "Moves", "W acpl", "B acpl"
        ));
        report.push_str(&"-".repeat(70));
        report.push('\n');
        for row in &self.games {
            report.push_str(&format!(
                "{:>4} {:<15} {:<15} {:>7} {:>6} {:>8} {:>8}\n",
                row.game,
                row.white,
                row.black,
                row.outcome,
                row.moves,
                format_acpl(row.white_acpl),
                format_acpl(row.black_acpl)
            ));
        }
        report.push_str(&format!(
            "\nScore for {}: {:.1}%\n",
            self.participants.first().map(String::as_str).unwrap_or("?"),
            self.score_for_first() * 100.0
        ));

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

fn format_acpl(acpl: Option<f64>) -> String {
    match acpl {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}
