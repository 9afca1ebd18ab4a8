//! Parametric search agent.
//!
//! Fixed-depth minimax with alpha-beta pruning over a weighted
//! material + positional evaluation, where the weights themselves are
//! tuned after every game from the oracle's verdict on the final
//! position. This is the classical half of the two learning strategies;
//! see `tabular_engine` for the other.

mod eval;
mod learn;
mod search;

pub use eval::{evaluate, EvalWeights, MATERIAL_FLOOR};
pub use learn::{update_after_game, DEFAULT_LEARNING_RATE};
pub use search::{order_moves, pick_best_move};

use agent_core::{Color, GameRecord, LearningAgent, Move, Oracle, OracleError, Position};

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

/// Alpha-beta search agent with oracle-tuned evaluation weights.
#[derive(Debug, Clone)]
pub struct ParametricAgent {
    name: String,
    weights: EvalWeights,
    depth: u8,
    learning_rate: f64,
}

impl ParametricAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: EvalWeights::default(),
            depth: DEFAULT_DEPTH,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// The current weight set. Persistence of weights across process
    /// lifetimes is owned by an external collaborator.
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn set_weights(&mut self, weights: EvalWeights) {
        self.weights = weights;
    }
}

impl Default for ParametricAgent {
    fn default() -> Self {
        Self::new("parametric")
    }
}

impl LearningAgent for ParametricAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, pos: &Position, side: Color) -> Option<Move> {
        pick_best_move(pos, &self.weights, side, self.depth).best_move
    }

    fn learn_from_game(
        &mut self,
        record: &GameRecord,
        _side: Color,
        oracle: &mut dyn Oracle,
    ) -> Result<(), OracleError> {
        update_after_game(
            &record.final_position,
            &mut self.weights,
            oracle,
            self.learning_rate,
        )
        .map(|_| ())
    }
}
