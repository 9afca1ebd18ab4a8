//! The self-play game loop.
//!
//! Plays full games between two agents, captures per-ply oracle
//! evaluations for learning and quality metrics, applies the post-game
//! learning updates, and hands per-game summaries back to the run loop
//! for rating and reporting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use agent_core::{
    Color, GameMetrics, GameOutcome, GameRecord, LearningAgent, Oracle, PlyRecord, Position,
};

use crate::config::RunConfig;
use crate::elo::EloTracker;
use crate::results::{GameRow, RunReport};

/// Lifecycle of a single orchestrated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Everything observed while playing one game.
#[derive(Debug)]
pub struct GameReport {
    pub record: GameRecord,
    /// Plies actually played, including substituted ones.
    pub moves: u32,
    /// Average centipawn loss per side; `None` when no moves were made.
    pub white_acpl: Option<f64>,
    pub black_acpl: Option<f64>,
    /// False when an oracle failure disabled evaluation mid-game. Learning
    /// updates are skipped for such games.
    pub oracle_ok: bool,
    pub illegal_moves: u32,
}

/// Runs learning games between two agents.
pub struct SelfPlayRunner {
    config: RunConfig,
    rng: StdRng,
    phase: GamePhase,
}

impl SelfPlayRunner {
    pub fn new(config: RunConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Plays one game from the starting position and applies both agents'
    /// learning updates.
    pub fn play_game<'a>(
        &mut self,
        white: &'a mut dyn LearningAgent,
        black: &'a mut dyn LearningAgent,
        oracle: &mut dyn Oracle,
    ) -> GameReport {
        self.phase = GamePhase::NotStarted;
        white.start_game();
        black.start_game();

        let mut pos = Position::startpos();
        let mut plies: Vec<PlyRecord> = Vec::new();
        let mut white_metrics = GameMetrics::default();
        let mut black_metrics = GameMetrics::default();
        let mut oracle_ok = true;
        let mut illegal_moves = 0u32;
        let mut moves = 0u32;

        // Tracked in White's perspective; flipped per mover below.
        let mut current_eval = eval_cp(oracle, &pos, &mut oracle_ok);

        self.phase = GamePhase::InProgress;
        while moves < self.config.max_moves && !pos.is_game_over() {
            let side = pos.side_to_move();
            let agent: &mut dyn LearningAgent = match side {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };

            let Some(requested) = agent.choose_move(&pos, side) else {
                break;
            };
            let mv = if pos.is_legal(requested) {
                requested
            } else {
                illegal_moves += 1;
                tracing::warn!(
                    agent = agent.name(),
                    mv = %requested,
                    "illegal move offered, substituting a random legal move"
                );
                agent.note_illegal_move(&pos, requested);
                match pos.legal_moves().choose(&mut self.rng).copied() {
                    Some(substitute) => substitute,
                    None => break,
                }
            };

            let next = pos.apply(mv);
            let next_eval = eval_cp(oracle, &next, &mut oracle_ok);
            let (pov_before, pov_after) = match side {
                Color::White => (current_eval, next_eval),
                Color::Black => (-current_eval, -next_eval),
            };
            match side {
                Color::White => white_metrics.record_loss((pov_before - pov_after) as f64),
                Color::Black => black_metrics.record_loss((pov_before - pov_after) as f64),
            }

            plies.push(PlyRecord {
                key_before: pos.canonical_key(),
                key_after: next.canonical_key(),
                mv: mv.to_string(),
                mover: side,
                eval_before: pov_before,
                eval_after: pov_after,
                terminal: next.is_game_over(),
            });

            current_eval = next_eval;
            pos = next;
            moves += 1;
        }
        self.phase = GamePhase::Finished;

        let outcome = if pos.is_checkmate() {
            // The side to move is the side that got mated.
            match pos.side_to_move() {
                Color::White => GameOutcome::BlackWins,
                Color::Black => GameOutcome::WhiteWins,
            }
        } else {
            // Stalemate, repetition, 50-move, insufficient material, or
            // the move cap.
            GameOutcome::Draw
        };

        let record = GameRecord {
            final_position: pos,
            plies,
            outcome,
        };

        if oracle_ok {
            for (agent, side) in [(&mut *white, Color::White), (&mut *black, Color::Black)] {
                if let Err(e) = agent.learn_from_game(&record, side, oracle) {
                    tracing::warn!(
                        agent = agent.name(),
                        error = %e,
                        "learning update failed, continuing without it"
                    );
                }
            }
        } else {
            tracing::warn!("oracle unavailable, skipping learning updates for this game");
        }

        GameReport {
            record,
            moves,
            white_acpl: white_metrics.average_loss(),
            black_acpl: black_metrics.average_loss(),
            oracle_ok,
            illegal_moves,
        }
    }

    /// Runs the configured number of games between `a` and `b`, updating
    /// ratings after every game.
    pub fn run(
        &mut self,
        a: &mut dyn LearningAgent,
        b: &mut dyn LearningAgent,
        oracle: &mut dyn Oracle,
        tracker: &mut EloTracker,
    ) -> RunReport {
        let a_name = a.name().to_string();
        let b_name = b.name().to_string();
        let mut report = RunReport::new(
            &format!("{} vs {}", a_name, b_name),
            vec![a_name.clone(), b_name.clone()],
            self.config.clone(),
        );

        for game_num in 0..self.config.games {
            let a_is_white = !self.config.alternate_colors || game_num % 2 == 0;
            let (white_name, black_name) = if a_is_white {
                (a_name.clone(), b_name.clone())
            } else {
                (b_name.clone(), a_name.clone())
            };

            let game = if a_is_white {
                self.play_game(a, b, oracle)
            } else {
                self.play_game(b, a, oracle)
            };

            let outcome = game.record.outcome;
            let (white_elo, black_elo) =
                tracker.record_game(&white_name, &black_name, outcome.score_for_white());
            tracing::info!(
                game = game_num + 1,
                total = self.config.games,
                white = %white_name,
                black = %black_name,
                outcome = outcome.as_str(),
                moves = game.moves,
                "game finished"
            );

            report.add_game(GameRow {
                game: game_num + 1,
                white: white_name,
                black: black_name,
                outcome: outcome.as_str().to_string(),
                moves: game.moves,
                white_acpl: game.white_acpl,
                black_acpl: game.black_acpl,
                white_elo,
                black_elo,
                oracle_ok: game.oracle_ok,
                illegal_moves: game.illegal_moves,
            });
        }

        report
    }
}

/// Oracle evaluation in centipawns from White's perspective.
///
/// The first failure logs a warning and pins `ok` false; subsequent calls
/// in the same game return 0 without touching the oracle.
fn eval_cp(oracle: &mut dyn Oracle, pos: &Position, ok: &mut bool) -> i32 {
    if !*ok {
        return 0;
    }
    match oracle.evaluate(pos) {
        Ok(score) => score.to_centipawns(),
        Err(e) => {
            tracing::warn!(error = %e, "oracle evaluation failed, disabling it for this game");
            *ok = false;
            0
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
