use super::*;
use crate::eval::EvalWeights;

/// Unpruned minimax reference with the same ordering and tie-breaking,
/// used to prove the alpha-beta cutoff never changes behavior.
fn minimax_reference(pos: &Position, weights: &EvalWeights, depth: u8, maximizing: bool) -> f64 {
    if depth == 0 || pos.is_game_over() {
        return evaluate(pos, weights, Color::White);
    }
    let mut moves = pos.legal_moves();
    order_moves(pos, &mut moves);
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for mv in moves {
        let child = pos.apply(mv);
        let score = minimax_reference(&child, weights, depth - 1, !maximizing);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

fn pick_best_move_reference(
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
    let mut best = moves[0];
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for mv in moves {
        let child = pos.apply(mv);
        let score = minimax_reference(&child, weights, depth.saturating_sub(1), !maximizing);
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best = mv;
        }
    }
    SearchResult {
        best_move: Some(best),
        score: best_score,
    }
}

#[test]
fn pruning_matches_reference_on_synthetic_positions() {
    let weights = EvalWeights::default();
    let cases = [
        // (fen, side, depth)
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Color::White, 2),
        ("k7/8/8/3q4/8/8/8/K2R4 w - - 0 1", Color::White, 2),
        ("k7/8/8/3q4/8/8/8/K2R4 w - - 0 1", Color::White, 3),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 4 4", Color::White, 2),
        ("rnbqkbnr/ppp2ppp/8/3pp3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 3", Color::White, 2),
        ("rnbqkbnr/ppp2ppp/8/3pp3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 3", Color::Black, 2),
        ("8/2p5/8/8/3P4/8/8/k6K w - - 0 1", Color::White, 3),
    ];

    for (fen, side, depth) in cases {
        let pos = Position::from_fen(fen).unwrap();
        let pruned = pick_best_move(&pos, &weights, side, depth);
        let reference = pick_best_move_reference(&pos, &weights, side, depth);
        assert_eq!(
            pruned.best_move, reference.best_move,
            "move mismatch for {fen} at depth {depth}"
        );
        assert_eq!(
            pruned.score, reference.score,
            "score mismatch for {fen} at depth {depth}"
        );
    }
}

#[test]
fn finds_mate_in_one_for_white() {
    let weights = EvalWeights::default();
    // Scholar's mate: Qf3xf7 is mate.
    let pos = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    )
    .unwrap();
    let result = pick_best_move(&pos, &weights, Color::White, 1);
    assert_eq!(format!("{}", result.best_move.unwrap()), "f3f7");
    assert_eq!(result.score, f64::INFINITY);
}

#[test]
fn finds_mate_in_one_for_black() {
    let weights = EvalWeights::default();
    // Fool's mate: after 1. f3 e5 2. g4, Qd8h4 is mate.
    let pos = Position::from_fen(
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
    )
    .unwrap();
    let result = pick_best_move(&pos, &weights, Color::Black, 1);
    assert_eq!(format!("{}", result.best_move.unwrap()), "d8h4");
    assert_eq!(result.score, f64::NEG_INFINITY);
}

#[test]
fn no_legal_moves_returns_none() {
    let weights = EvalWeights::default();
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    let result = pick_best_move(&pos, &weights, Color::Black, 3);
    assert!(result.best_move.is_none());
}

#[test]
fn takes_the_hanging_queen() {
    let weights = EvalWeights::default();
    let pos = Position::from_fen("k7/8/8/3q4/8/8/8/K2R4 w - - 0 1").unwrap();
    let result = pick_best_move(&pos, &weights, Color::White, 2);
    assert_eq!(format!("{}", result.best_move.unwrap()), "d1d5");
    assert!(result.score >= 500.0);
}
