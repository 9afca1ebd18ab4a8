//! Minimax search with alpha-beta pruning and move ordering.

use agent_core::{Color, Move, Position, SearchResult};

use crate::eval::{evaluate, EvalWeights};

/// Ordering weight: promotions ahead of captures ahead of quiet moves.
fn order_key(pos: &Position, mv: Move) -> u8 {
    if mv.promotion.is_some() {
        2
    } else if pos.is_capture(mv) {
        1
    } else {
        0
    }
}

/// Sorts moves in place, best-first. The sort is stable, so moves within
/// a class keep the rules engine's deterministic generation order.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| std::cmp::Reverse(order_key(pos, mv)));
}

/// Searches `pos` to `depth` plies and returns the best move for `side`.
///
/// Leaf positions are scored from White's perspective; the root picks the
/// maximum when `side` is White and the minimum when Black, with the
/// maximizing/minimizing role alternating below. The alpha-beta cutoff is
/// an optimization only: the returned move and score are identical to
/// unpruned minimax under the same move ordering.
///
/// A position with no legal moves yields `best_move: None`; the caller
/// treats that as a game-end signal.
pub fn pick_best_move(
    pos: &Position,
    weights: &EvalWeights,
    side: Color,
    depth: u8,
) -> SearchResult {
    let mut moves = pos.legal_moves();
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            score: 0.0,
        };
    }
    order_moves(pos, &mut moves);

    let maximizing = side == Color::White;
    let mut alpha = f64::NEG_INFINITY;
    let mut beta = f64::INFINITY;
    let mut best = moves[0];
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in moves {
        let child = pos.apply(mv);
        let score = minimax(
            &child,
            weights,
            depth.saturating_sub(1),
            alpha,
            beta,
            !maximizing,
        );

        if maximizing {
            if score > best_score {
                best_score = score;
                best = mv;
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best = mv;
            }
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    SearchResult {
        best_move: Some(best),
        score: best_score,
    }
}

fn minimax(
    pos: &Position,
    weights: &EvalWeights,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> f64 {
    if depth == 0 || pos.is_game_over() {
        return evaluate(pos, weights, Color::White);
    }

    let mut moves = pos.legal_moves();
    order_moves(pos, &mut moves);

    if maximizing {
        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            let child = pos.apply(mv);
            let score = minimax(&child, weights, depth - 1, alpha, beta, false);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for mv in moves {
            let child = pos.apply(mv);
            let score = minimax(&child, weights, depth - 1, alpha, beta, true);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
