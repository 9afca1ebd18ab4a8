//! The reference-oracle interface.
//!
//! The oracle is a stronger external evaluator used purely as a feedback
//! signal for learning; search never depends on it. Scores are always
//! reported from White's perspective so every consumer shares one sign
//! convention.

use std::time::Duration;

use thiserror::Error;

use crate::position::Position;
use cozy_chess::{Color, Move, Piece};

/// Finite stand-in magnitude for forced-mate scores, in centipawns.
///
/// Mates are clamped to this before any arithmetic so learning updates
/// stay bounded.
pub const MATE_SCORE_CP: i32 = 100_000;

/// An oracle evaluation, from White's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawns; positive favors White.
    Centipawns(i32),
    /// Forced mate in the given number of moves; positive means White mates.
    MateIn(i32),
}

impl Score {
    /// Collapses the score to centipawns, clamping mates to ±[`MATE_SCORE_CP`].
    pub fn to_centipawns(self) -> i32 {
        match self {
            Score::Centipawns(v) => v,
            Score::MateIn(m) => {
                if m > 0 {
                    MATE_SCORE_CP
                } else {
                    -MATE_SCORE_CP
                }
            }
        }
    }
}

/// Errors from the oracle adapter.
///
/// All of these are recovered locally by the orchestrator: the learning
/// update for the affected game is skipped with a warning, never retried.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),
    #[error("oracle protocol error: {0}")]
    Protocol(String),
    #[error("oracle process terminated")]
    Terminated,
}

/// Blocking request/response interface to the reference engine.
pub trait Oracle: Send {
    /// Evaluates the position from White's perspective.
    fn evaluate(&mut self, pos: &Position) -> Result<Score, OracleError>;

    /// The oracle's recommended move for the side to move.
    fn best_move(&mut self, pos: &Position) -> Result<Move, OracleError>;
}

/// Returns the conventional material value of a piece in centipawns.
#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

/// A deterministic offline oracle.
///
/// Evaluates by fixed material count and recommends the greediest
/// capture. Useful for exercising the learning loop and the test suite
/// without an external engine process; any real training run should use
/// a UCI oracle instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialOracle;

impl MaterialOracle {
    pub fn new() -> Self {
        Self
    }

    fn material_cp(pos: &Position) -> i32 {
        let mut score = 0i32;
        for piece in Piece::ALL {
            let v = piece_value(piece);
            score += pos.piece_count(Color::White, piece) as i32 * v;
            score -= pos.piece_count(Color::Black, piece) as i32 * v;
        }
        score
    }
}

impl Oracle for MaterialOracle {
    fn evaluate(&mut self, pos: &Position) -> Result<Score, OracleError> {
        if pos.is_checkmate() {
            // The side to move is the side that got mated.
            return Ok(if pos.side_to_move() == Color::White {
                Score::MateIn(-1)
            } else {
                Score::MateIn(1)
            });
        }
        if pos.is_game_over() {
            return Ok(Score::Centipawns(0));
        }
        Ok(Score::Centipawns(Self::material_cp(pos)))
    }

    fn best_move(&mut self, pos: &Position) -> Result<Move, OracleError> {
        let moves = pos.legal_moves();
        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let gain = pos
                .board()
                .piece_on(mv.to)
                .map(piece_value)
                .unwrap_or(0)
                + mv.promotion.map(piece_value).unwrap_or(0);
            match best {
                Some((_, g)) if g >= gain => {}
                _ => best = Some((mv, gain)),
            }
        }
        best.map(|(mv, _)| mv)
            .ok_or_else(|| OracleError::Protocol("no legal moves to recommend".into()))
    }
}
