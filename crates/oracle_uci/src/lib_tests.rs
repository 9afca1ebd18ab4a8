use super::*;

#[test]
fn info_line_with_cp_score() {
    let line = "info depth 10 seldepth 14 multipv 1 score cp 35 nodes 12345 pv e2e4 e7e5";
    assert_eq!(parse_info_score(line), Some(Score::Centipawns(35)));
}

#[test]
fn info_line_with_negative_cp_score() {
    assert_eq!(
        parse_info_score("info depth 8 score cp -250 time 12"),
        Some(Score::Centipawns(-250))
    );
}

#[test]
fn info_line_with_mate_score() {
    assert_eq!(
        parse_info_score("info depth 5 score mate 3 pv f3f7"),
        Some(Score::MateIn(3))
    );
    assert_eq!(
        parse_info_score("info depth 5 score mate -2"),
        Some(Score::MateIn(-2))
    );
}

#[test]
fn non_score_lines_are_ignored() {
    assert_eq!(parse_info_score("info string NNUE evaluation enabled"), None);
    assert_eq!(parse_info_score("bestmove e2e4"), None);
    assert_eq!(parse_info_score("readyok"), None);
    assert_eq!(parse_info_score("info depth 3 score lowerbound"), None);
}

#[test]
fn bestmove_lines() {
    assert_eq!(parse_bestmove("bestmove e2e4 ponder e7e5"), Some("e2e4"));
    assert_eq!(parse_bestmove("bestmove a7a8q"), Some("a7a8q"));
    assert_eq!(parse_bestmove("bestmove 0000"), None);
    assert_eq!(parse_bestmove("bestmove (none)"), None);
    assert_eq!(parse_bestmove("info depth 1"), None);
}

#[test]
fn scores_flip_to_white_perspective() {
    assert_eq!(
        to_white_pov(Score::Centipawns(50), Color::White),
        Score::Centipawns(50)
    );
    assert_eq!(
        to_white_pov(Score::Centipawns(50), Color::Black),
        Score::Centipawns(-50)
    );
    assert_eq!(
        to_white_pov(Score::MateIn(2), Color::Black),
        Score::MateIn(-2)
    );
}

#[test]
fn plain_moves_resolve_directly() {
    let pos = Position::startpos();
    let mv = resolve_uci_move(&pos, "e2e4").unwrap();
    assert!(pos.is_legal(mv));
    assert_eq!(format!("{}", mv), "e2e4");
}

#[test]
fn castling_text_translates_to_rook_square() {
    // White to move, short castling available.
    let pos = Position::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/4PN2/PPPPBPPP/RNBQK2R w KQkq - 0 1",
    )
    .unwrap();
    let mv = resolve_uci_move(&pos, "e1g1").unwrap();
    assert_eq!(format!("{}", mv), "e1h1");
    assert!(pos.is_legal(mv));
}

#[test]
fn garbage_move_text_is_rejected() {
    let pos = Position::startpos();
    assert!(resolve_uci_move(&pos, "zz99").is_none());
    // Legal notation, illegal move.
    assert!(resolve_uci_move(&pos, "e2e5").is_none());
}
