//! Random-move baseline agent.
//!
//! Selects moves uniformly at random from all legal moves and learns
//! nothing. Useful for:
//! - Testing infrastructure before training the real agents
//! - Baseline comparisons (any learning agent should eventually beat this)
//! - Stress testing the game loop

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use agent_core::{Color, GameRecord, LearningAgent, Move, Oracle, OracleError, Position};

#[cfg(test)]
mod lib_tests;

/// An agent that plays random legal moves.
///
/// Provides no evaluation and ignores game outcomes. It's the simplest
/// possible opponent and serves as the rating baseline for the
/// leaderboard.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, rand::thread_rng().gen())
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new("random")
    }
}

impl LearningAgent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, pos: &Position, _side: Color) -> Option<Move> {
        pos.legal_moves().choose(&mut self.rng).copied()
    }

    fn learn_from_game(
        &mut self,
        _record: &GameRecord,
        _side: Color,
        _oracle: &mut dyn Oracle,
    ) -> Result<(), OracleError> {
        Ok(())
    }
}
