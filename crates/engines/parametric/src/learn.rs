//! End-of-game weight tuning against the oracle.
//!
//! A single whole-game update: the gap between the oracle's verdict on
//! the final position and the evaluator's own is attributed to the final
//! position's feature composition, gradient-style.

use agent_core::{Color, Oracle, OracleError, Piece, Position, MATE_SCORE_CP};

use crate::eval::{evaluate, EvalWeights};

/// Default step size. Small enough that a single game nudges weights
/// gently; drift accumulates over many games.
pub const DEFAULT_LEARNING_RATE: f64 = 5e-5;

/// Adjusts `weights` from the oracle's evaluation of the final position.
///
/// Both evaluations are taken from White's perspective regardless of the
/// agent's own side, so the error term has one consistent sign. The
/// agent's evaluation of a mated final position is infinite; it is
/// clamped to the same ±[`MATE_SCORE_CP`] magnitude as oracle mate scores
/// so the update stays finite. Returns the error for logging.
pub fn update_after_game(
    final_pos: &Position,
    weights: &mut EvalWeights,
    oracle: &mut dyn Oracle,
    learning_rate: f64,
) -> Result<f64, OracleError> {
    let clamp = MATE_SCORE_CP as f64;
    let oracle_eval = oracle.evaluate(final_pos)?.to_centipawns() as f64;
    let agent_eval = evaluate(final_pos, weights, Color::White).clamp(-clamp, clamp);
    let error = oracle_eval - agent_eval;

    for piece in Piece::ALL {
        let feature = final_pos.piece_count(Color::White, piece) as f64
            - final_pos.piece_count(Color::Black, piece) as f64;
        *weights.material_mut(piece) += learning_rate * error * feature;
    }
    for (sq, w) in weights.positional_mut() {
        let feature = match final_pos.color_on(*sq) {
            Some(Color::White) => 1.0,
            Some(Color::Black) => -1.0,
            None => 0.0,
        };
        *w += learning_rate * error * feature;
    }
    weights.clamp();

    Ok(error)
}
