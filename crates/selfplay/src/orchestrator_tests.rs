use super::*;

use agent_core::{MaterialOracle, Move, OracleError, Score};
use random_engine::RandomAgent;
use tabular_engine::{TabularAgent, EPSILON_START};

fn test_config(games: u32, max_moves: u32) -> RunConfig {
    RunConfig {
        games,
        max_moves,
        seed: Some(5),
        ..Default::default()
    }
}

/// Oracle stub that fails every request.
struct DeadOracle;

impl Oracle for DeadOracle {
    fn evaluate(&mut self, _pos: &Position) -> Result<Score, OracleError> {
        Err(OracleError::Terminated)
    }
    fn best_move(&mut self, _pos: &Position) -> Result<Move, OracleError> {
        Err(OracleError::Terminated)
    }
}

/// Agent that always offers the same impossible move.
struct Stubborn {
    penalized: u32,
}

impl LearningAgent for Stubborn {
    fn name(&self) -> &str {
        "stubborn"
    }
    fn choose_move(&mut self, _pos: &Position, _side: Color) -> Option<Move> {
        // No piece moves e2 to d5 in one step, so this is never legal.
        Some("e2d5".parse().unwrap())
    }
    fn learn_from_game(
        &mut self,
        _record: &GameRecord,
        _side: Color,
        _oracle: &mut dyn Oracle,
    ) -> Result<(), OracleError> {
        Ok(())
    }
    fn note_illegal_move(&mut self, _pos: &Position, _mv: Move) {
        self.penalized += 1;
    }
}

#[test]
fn random_self_play_completes() {
    let mut white = RandomAgent::with_seed("rw", 1);
    let mut black = RandomAgent::with_seed("rb", 2);
    let mut oracle = MaterialOracle::new();
    let mut runner = SelfPlayRunner::new(test_config(1, 60));

    let game = runner.play_game(&mut white, &mut black, &mut oracle);

    assert_eq!(runner.phase(), GamePhase::Finished);
    assert!(game.oracle_ok);
    assert_eq!(game.illegal_moves, 0);
    assert!(game.moves >= 1 && game.moves <= 60);
    assert_eq!(game.record.plies.len(), game.moves as usize);
    // Only the last ply may end the game.
    for ply in &game.record.plies[..game.record.plies.len() - 1] {
        assert!(!ply.terminal);
    }
    // Both sides moved, so both sides have quality metrics.
    assert!(game.white_acpl.unwrap() >= 0.0);
    assert!(game.black_acpl.unwrap() >= 0.0);
}

#[test]
fn move_cap_forces_a_draw_unless_mated() {
    let mut white = RandomAgent::with_seed("rw", 3);
    let mut black = RandomAgent::with_seed("rb", 4);
    let mut oracle = MaterialOracle::new();
    let mut runner = SelfPlayRunner::new(test_config(1, 6));

    let game = runner.play_game(&mut white, &mut black, &mut oracle);
    assert!(game.moves <= 6);
    if !game.record.final_position.is_checkmate() {
        assert_eq!(game.record.outcome, GameOutcome::Draw);
    }
}

#[test]
fn illegal_offers_are_substituted_and_penalized() {
    let mut white = Stubborn { penalized: 0 };
    let mut black = RandomAgent::with_seed("rb", 7);
    let mut oracle = MaterialOracle::new();
    let mut runner = SelfPlayRunner::new(test_config(1, 10));

    let game = runner.play_game(&mut white, &mut black, &mut oracle);

    // Every one of White's offers was rejected, substituted, and the
    // game still progressed on legal moves only.
    assert!(game.illegal_moves >= 1);
    assert_eq!(white.penalized, game.illegal_moves);
    assert_eq!(game.record.plies.len(), game.moves as usize);
    for ply in &game.record.plies {
        assert_ne!(ply.mv, "e2d5");
    }
}

#[test]
fn learning_updates_apply_when_oracle_is_healthy() {
    let mut a = TabularAgent::with_seed("ta", 1);
    let mut b = TabularAgent::with_seed("tb", 2);
    let mut oracle = MaterialOracle::new();
    let mut runner = SelfPlayRunner::new(test_config(1, 30));

    let game = runner.play_game(&mut a, &mut b, &mut oracle);

    assert!(game.oracle_ok);
    // The post-game update ran: exploration decayed for both agents.
    assert!(a.epsilon() < EPSILON_START);
    assert!(b.epsilon() < EPSILON_START);
}

#[test]
fn dead_oracle_disables_evaluation_and_learning() {
    let mut a = TabularAgent::with_seed("ta", 1);
    let mut b = TabularAgent::with_seed("tb", 2);
    let mut oracle = DeadOracle;
    let mut runner = SelfPlayRunner::new(test_config(1, 20));

    let game = runner.play_game(&mut a, &mut b, &mut oracle);

    assert!(!game.oracle_ok);
    for ply in &game.record.plies {
        assert_eq!(ply.eval_before, 0);
        assert_eq!(ply.eval_after, 0);
    }
    // Learning was skipped, so exploration never decayed.
    assert_eq!(a.epsilon(), EPSILON_START);
    assert_eq!(b.epsilon(), EPSILON_START);
}

#[test]
fn run_rates_every_game_and_alternates_colors() {
    let mut a = RandomAgent::with_seed("alpha", 1);
    let mut b = RandomAgent::with_seed("beta", 2);
    let mut oracle = MaterialOracle::new();
    let mut tracker = EloTracker::new();
    let mut runner = SelfPlayRunner::new(test_config(4, 40));

    let report = runner.run(&mut a, &mut b, &mut oracle, &mut tracker);

    assert_eq!(report.games.len(), 4);
    assert_eq!(tracker.games_played["alpha"], 4);
    assert_eq!(tracker.games_played["beta"], 4);
    let pool: f64 = tracker.ratings.values().sum();
    assert!((pool - 2.0 * crate::DEFAULT_ELO).abs() < 1e-6);

    assert_eq!(report.games[0].white, "alpha");
    assert_eq!(report.games[1].white, "beta");
    assert_eq!(report.games[2].white, "alpha");
    assert_eq!(report.games[3].white, "beta");
}
