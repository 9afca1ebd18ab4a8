use super::*;

#[test]
fn random_agent_returns_legal_move() {
    let mut agent = RandomAgent::with_seed("r", 1);
    let pos = Position::startpos();

    for _ in 0..20 {
        let mv = agent.choose_move(&pos, Color::White).unwrap();
        assert!(pos.is_legal(mv));
    }
}

#[test]
fn random_agent_handles_checkmate() {
    let mut agent = RandomAgent::with_seed("r", 1);
    let pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(agent.choose_move(&pos, Color::Black).is_none());
}

#[test]
fn random_agent_handles_stalemate() {
    let mut agent = RandomAgent::with_seed("r", 1);
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert!(agent.choose_move(&pos, Color::Black).is_none());
}

#[test]
fn seeded_agents_replay_the_same_choices() {
    let mut a = RandomAgent::with_seed("r", 99);
    let mut b = RandomAgent::with_seed("r", 99);
    let pos = Position::startpos();
    for _ in 0..10 {
        assert_eq!(
            a.choose_move(&pos, Color::White),
            b.choose_move(&pos, Color::White)
        );
    }
}
