//! Weighted material + positional evaluation.
//!
//! The weight set is the mutable half of the evaluation contract: the
//! learner nudges it between games, the search reads it inside a game.

use agent_core::{Color, Piece, Position, Square};

/// Lowest value any non-king material weight may take.
pub const MATERIAL_FLOOR: f64 = 1.0;

/// Positional-bonus squares and their starting weights: the four center
/// squares, the knight development squares, and a few shelter pawns.
const DEFAULT_BONUSES: [(Square, f64); 12] = [
    (Square::D4, 10.0),
    (Square::E4, 10.0),
    (Square::D5, 10.0),
    (Square::E5, 10.0),
    (Square::C3, 5.0),
    (Square::F3, 5.0),
    (Square::C6, 5.0),
    (Square::F6, 5.0),
    (Square::G2, 2.0),
    (Square::B2, 2.0),
    (Square::A7, 2.0),
    (Square::H7, 2.0),
];

/// Mutable evaluation parameters: one weight per piece kind plus a small
/// set of positional-bonus squares.
///
/// Invariants, restored by [`EvalWeights::clamp`] after every update:
/// material weights stay >= [`MATERIAL_FLOOR`] except the king's, which
/// is pinned at zero (mate handling covers the king); positional bonuses
/// stay >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalWeights {
    material: [f64; 6],
    positional: [(Square, f64); 12],
}

impl Default for EvalWeights {
    fn default() -> Self {
        let mut material = [0.0; 6];
        for piece in Piece::ALL {
            material[piece as usize] = agent_core::piece_value(piece) as f64;
        }
        Self {
            material,
            positional: DEFAULT_BONUSES,
        }
    }
}

impl EvalWeights {
    pub fn material(&self, piece: Piece) -> f64 {
        self.material[piece as usize]
    }

    pub fn material_mut(&mut self, piece: Piece) -> &mut f64 {
        &mut self.material[piece as usize]
    }

    pub fn positional(&self) -> &[(Square, f64)] {
        &self.positional
    }

    pub fn positional_mut(&mut self) -> &mut [(Square, f64)] {
        &mut self.positional
    }

    /// Restores the weight invariants after an update.
    pub fn clamp(&mut self) {
        for piece in Piece::ALL {
            let w = &mut self.material[piece as usize];
            if piece == Piece::King {
                *w = 0.0;
            } else {
                *w = w.max(MATERIAL_FLOOR);
            }
        }
        for (_, w) in &mut self.positional {
            *w = w.max(0.0);
        }
    }
}

/// Scores `pos` from `perspective`'s point of view.
///
/// Terminal detection takes priority: checkmate is +inf when the
/// perspective side's opponent is to move (it was mated) and -inf
/// otherwise; every draw condition scores exactly 0. Non-terminal
/// positions score material difference times weight plus signed
/// positional bonuses, computed from White's side and negated for Black.
pub fn evaluate(pos: &Position, weights: &EvalWeights, perspective: Color) -> f64 {
    if pos.is_checkmate() {
        // The side to move is the mated side.
        return if pos.side_to_move() == perspective {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if pos.is_stalemate()
        || pos.is_insufficient_material()
        || pos.is_draw_by_repetition_or_move_limit()
    {
        return 0.0;
    }

    let mut score = 0.0;
    for piece in Piece::ALL {
        let diff = pos.piece_count(Color::White, piece) as f64
            - pos.piece_count(Color::Black, piece) as f64;
        score += diff * weights.material(piece);
    }
    for &(sq, w) in weights.positional() {
        match pos.color_on(sq) {
            Some(Color::White) => score += w,
            Some(Color::Black) => score -= w,
            None => {}
        }
    }

    if perspective == Color::White {
        score
    } else {
        -score
    }
}
