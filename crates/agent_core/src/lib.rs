//! Shared contracts for the self-play learning agents.
//!
//! This crate owns the seams between the runner, the engines, and the
//! external oracle:
//! - [`Position`]: immutable snapshot adapter over the rules engine
//! - [`Oracle`]: the reference-engine feedback interface
//! - [`LearningAgent`]: implemented by every playing/learning strategy
//! - per-game bookkeeping ([`GameRecord`], [`PlyRecord`], [`GameMetrics`])

pub mod game;
pub mod oracle;
pub mod position;

pub use game::*;
pub use oracle::*;
pub use position::*;

// Re-export the rules engine vocabulary so downstream crates don't need a
// direct cozy-chess dependency for everyday types.
pub use cozy_chess::{Color, Move, Piece, Square};

/// Result of a search operation.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score of the best line. Infinite magnitudes denote forced mates.
    pub score: f64,
}

/// Trait implemented by every agent that can play and learn.
///
/// This allows swapping between the parametric (search + weight tuning)
/// strategy, the tabular TD(0) strategy, and baseline agents without
/// duplicating the self-play loop.
pub trait LearningAgent: Send {
    /// Returns the agent's display name for ratings and reports.
    fn name(&self) -> &str;

    /// Picks a move for `side` in `pos`.
    ///
    /// Returns `None` when the agent has no move to offer (no legal moves);
    /// the orchestrator treats that as a game-end signal, not an error.
    fn choose_move(&mut self, pos: &Position, side: Color) -> Option<Move>;

    /// Called exactly once after a completed game.
    ///
    /// `record` holds the final position and the full per-ply history;
    /// `side` is the color this agent played. Implementations may consult
    /// the oracle. An `Err` means the update was not applied; the caller
    /// logs it and moves on.
    fn learn_from_game(
        &mut self,
        record: &GameRecord,
        side: Color,
        oracle: &mut dyn Oracle,
    ) -> Result<(), OracleError>;

    /// Reset per-game transient state before a new game starts.
    fn start_game(&mut self) {}

    /// Called when the agent produced a move outside the current legal set.
    ///
    /// The orchestrator has already substituted a random legal move; this
    /// hook lets the agent penalize whatever produced the bad move.
    fn note_illegal_move(&mut self, _pos: &Position, _mv: Move) {}
}
