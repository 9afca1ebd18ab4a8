//! Per-game bookkeeping shared by the orchestrator and the learners.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use cozy_chess::Color;

/// Final result of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameOutcome {
    /// Elo score for White: 1.0 win, 0.5 draw, 0.0 loss.
    pub fn score_for_white(self) -> f64 {
        match self {
            GameOutcome::WhiteWins => 1.0,
            GameOutcome::Draw => 0.5,
            GameOutcome::BlackWins => 0.0,
        }
    }

    /// Terminal reward for `side`: +1 win, 0 draw, -1 loss.
    pub fn reward_for(self, side: Color) -> f64 {
        match (self, side) {
            (GameOutcome::Draw, _) => 0.0,
            (GameOutcome::WhiteWins, Color::White) | (GameOutcome::BlackWins, Color::Black) => 1.0,
            _ => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }
}

/// One recorded half-move.
///
/// Oracle evaluations are centipawns from the mover's perspective, with
/// mates already clamped; they are captured during play so the tabular
/// backup never has to re-query the oracle.
#[derive(Debug, Clone)]
pub struct PlyRecord {
    /// Canonical key of the position the move was made in.
    pub key_before: String,
    /// Canonical key of the resulting position.
    pub key_after: String,
    /// Move encoding (rules-engine notation).
    pub mv: String,
    /// Side that made the move.
    pub mover: Color,
    /// Oracle evaluation before the move, mover's perspective.
    pub eval_before: i32,
    /// Oracle evaluation after the move, mover's perspective.
    pub eval_after: i32,
    /// Whether this move ended the game.
    pub terminal: bool,
}

/// Everything a learner gets to see about a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub final_position: Position,
    pub plies: Vec<PlyRecord>,
    pub outcome: GameOutcome,
}

/// Per-game centipawn-loss counters for one side.
///
/// Reset at the start of every game, accumulated ply by ply, read once at
/// game end for the average-centipawn-loss statistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameMetrics {
    pub centipawn_loss: f64,
    pub moves_made: u32,
}

impl GameMetrics {
    /// Records one move's loss; negative losses (the oracle liked the
    /// move better than the position before it) count as zero.
    pub fn record_loss(&mut self, cp_loss: f64) {
        self.centipawn_loss += cp_loss.max(0.0);
        self.moves_made += 1;
    }

    /// Average centipawn loss, or `None` before any move was recorded.
    pub fn average_loss(&self) -> Option<f64> {
        if self.moves_made == 0 {
            None
        } else {
            Some(self.centipawn_loss / self.moves_made as f64)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
