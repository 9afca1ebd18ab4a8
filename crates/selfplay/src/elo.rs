//! Elo rating calculation and tracking

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default starting Elo for new agents
pub const DEFAULT_ELO: f64 = 1200.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Elo rating system for tracking agent strength
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    /// Ratings for each agent (by name)
    pub ratings: HashMap<String, f64>,
    /// Number of games played by each agent
    pub games_played: HashMap<String, u32>,
    /// Per-game history for analysis
    pub history: Vec<EloGameRecord>,
}

/// Record of a single rated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloGameRecord {
    pub white: String,
    pub black: String,
    /// 1.0 white win, 0.5 draw, 0.0 black win
    pub score_for_white: f64,
    pub elo_change: f64,
    pub timestamp: String,
}

impl EloTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tracker from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save tracker to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to serialize ratings")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Get or initialize rating for an agent
    pub fn get_rating(&mut self, agent: &str) -> f64 {
        *self.ratings.entry(agent.to_string()).or_insert(DEFAULT_ELO)
    }

    /// Expected score for `white` against `black`
    pub fn expected_score(&mut self, white: &str, black: &str) -> f64 {
        let rw = self.get_rating(white);
        let rb = self.get_rating(black);
        1.0 / (1.0 + 10.0_f64.powf((rb - rw) / 400.0))
    }

    /// Update ratings after one game.
    ///
    /// `score_for_white` is 1.0 / 0.5 / 0.0. Black's change is exactly the
    /// negation of White's, so the rating pool is conserved. Returns the
    /// new (white, black) ratings.
    pub fn record_game(
        &mut self,
        white: &str,
        black: &str,
        score_for_white: f64,
    ) -> (f64, f64) {
        let expected = self.expected_score(white, black);
        let elo_change = K_FACTOR * (score_for_white - expected);

        let rw = self.get_rating(white) + elo_change;
        let rb = self.get_rating(black) - elo_change;
        self.ratings.insert(white.to_string(), rw);
        self.ratings.insert(black.to_string(), rb);

        *self.games_played.entry(white.to_string()).or_insert(0) += 1;
        *self.games_played.entry(black.to_string()).or_insert(0) += 1;

        self.history.push(EloGameRecord {
            white: white.to_string(),
            black: black.to_string(),
            score_for_white,
            elo_change,
            timestamp: unix_timestamp(),
        });

        (rw, rb)
    }

    /// Get a sorted leaderboard
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Agent Leaderboard ===");
        println!("{:<30} {:>8} {:>8}", "Agent", "Elo", "Games");
        println!("{}", "-".repeat(50));
        for (name, rating, games) in self.leaderboard() {
            println!("{:<30} {:>8.1} {:>8}", name, rating, games);
        }
        println!();
    }
}

/// Simple timestamp without external dependency
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratings_expect_half() {
        let mut tracker = EloTracker::new();
        let expected = tracker.expected_score("a", "b");
        assert!((expected - 0.5).abs() < 1e-9);
    }

    #[test]
    fn evenly_matched_win_moves_sixteen_points() {
        let mut tracker = EloTracker::new();
        let (white, black) = tracker.record_game("a", "b", 1.0);
        assert!((white - 1216.0).abs() < 1e-9);
        assert!((black - 1184.0).abs() < 1e-9);
    }

    #[test]
    fn draw_between_equals_changes_nothing() {
        let mut tracker = EloTracker::new();
        let (white, black) = tracker.record_game("a", "b", 0.5);
        assert!((white - DEFAULT_ELO).abs() < 1e-9);
        assert!((black - DEFAULT_ELO).abs() < 1e-9);
    }

    #[test]
    fn underdog_gains_more_from_an_upset() {
        let mut tracker = EloTracker::new();
        tracker.ratings.insert("favorite".into(), 1400.0);
        tracker.ratings.insert("underdog".into(), 1200.0);

        let (w, _) = tracker.record_game("underdog", "favorite", 1.0);
        // Expected score well under 0.5, so the gain exceeds 16 points.
        assert!(w - 1200.0 > 16.0);
    }

    #[test]
    fn rating_pool_is_conserved() {
        let mut tracker = EloTracker::new();
        let results = [1.0, 0.0, 0.5, 1.0, 1.0, 0.0, 0.5];
        for (i, score) in results.iter().enumerate() {
            if i % 2 == 0 {
                tracker.record_game("a", "b", *score);
            } else {
                tracker.record_game("b", "a", *score);
            }
        }
        let total: f64 = tracker.ratings.values().sum();
        assert!((total - 2.0 * DEFAULT_ELO).abs() < 1e-6);
        assert_eq!(tracker.games_played["a"], results.len() as u32);
    }

    #[test]
    fn leaderboard_sorts_by_rating() {
        let mut tracker = EloTracker::new();
        tracker.record_game("strong", "weak", 1.0);
        tracker.record_game("strong", "weak", 1.0);
        let board = tracker.leaderboard();
        assert_eq!(board[0].0, "strong");
        assert_eq!(board[1].0, "weak");
        assert!(board[0].1 > board[1].1);
    }
}
