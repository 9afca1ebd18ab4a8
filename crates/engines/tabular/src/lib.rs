//! Tabular TD(0) agent.
//!
//! The alternate learning strategy: no search, just a state-action value
//! table. Moves are picked epsilon-greedily against the table; after each
//! game the recorded plies are replayed backwards and every entry the
//! agent touched gets a one-step temporal-difference backup driven by
//! oracle centipawn deltas, with the terminal game outcome anchoring the
//! final move.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use agent_core::{Color, GameOutcome, GameRecord, LearningAgent, Move, Oracle, OracleError, PlyRecord, Position};


/// Value added to a table entry that produced an illegal move.
pub const ILLEGAL_MOVE_PENALTY: f64 = -1000.0;

/// Exploration schedule: start, per-game multiplicative decay, floor.
pub const EPSILON_START: f64 = 0.5;
pub const EPSILON_DECAY: f64 = 0.999;
pub const EPSILON_MIN: f64 = 0.05;

/// State-action value estimates, keyed by canonical position key and
/// move encoding.
///
/// Entries are only ever added or updated, never removed; the table
/// accumulates for the agent's whole lifetime. Load-at-start /
/// save-at-end persistence is owned by an external collaborator, which
/// is why the type is serializable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueTable {
    entries: HashMap<String, HashMap<String, f64>>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a state-action pair; unseen pairs are 0.
    pub fn get(&self, key: &str, mv: &str) -> f64 {
        self.entries
            .get(key)
            .and_then(|moves| moves.get(mv))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, key: &str, mv: &str, value: f64) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(mv.to_string(), value);
    }

    pub fn add(&mut self, key: &str, mv: &str, delta: f64) {
        let old = self.get(key, mv);
        self.set(key, mv, old + delta);
    }

    /// Greatest value among the entries for `key`.
    ///
    /// Folds from 0, so an unseen position — or one where every tried
    /// move looked bad — contributes nothing to the TD target.
    pub fn max_value(&self, key: &str) -> f64 {
        self.entries
            .get(key)
            .map(|moves| moves.values().copied().fold(0.0, f64::max))
            .unwrap_or(0.0)
    }

    /// Number of state-action pairs stored.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Epsilon-greedy TD(0) learning agent.
pub struct TabularAgent {
    name: String,
    table: ValueTable,
    epsilon: f64,
    learning_rate: f64,
    discount: f64,
    /// Scale applied to oracle centipawn deltas when shaping rewards.
    reward_per_cp: f64,
    rng: StdRng,
}

impl TabularAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, rand::thread_rng().gen())
    }

    /// Deterministic construction for tests and reproducible runs.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            table: ValueTable::new(),
            epsilon: EPSILON_START,
            learning_rate: 0.1,
            discount: 0.9,
            reward_per_cp: 0.01,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn set_table(&mut self, table: ValueTable) {
        self.table = table;
    }

    /// Epsilon-greedy selection over the legal moves.
    ///
    /// With probability epsilon a uniformly random legal move; otherwise
    /// the entry with the greatest table value, ties broken uniformly at
    /// random. `None` only when there are no legal moves.
    pub fn select_move(&mut self, pos: &Position) -> Option<Move> {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return None;
        }
        if self.rng.gen::<f64>() < self.epsilon {
            return moves.choose(&mut self.rng).copied();
        }

        let key = pos.canonical_key();
        let mut best_value = f64::NEG_INFINITY;
        let mut candidates: Vec<Move> = Vec::new();
        for mv in moves {
            let value = self.table.get(&key, &mv.to_string());
            if value > best_value {
                best_value = value;
                candidates.clear();
                candidates.push(mv);
            } else if value == best_value {
                candidates.push(mv);
            }
        }
        candidates.choose(&mut self.rng).copied()
    }

    /// TD(0) backup over the recorded plies, newest first.
    ///
    /// For each ply this agent made: the move that ended the game is
    /// rewarded with the mapped outcome (+1/0/-1) and no successor term;
    /// any other move is rewarded with the oracle's centipawn swing
    /// scaled by `reward_per_cp`, plus the discounted best table value of
    /// the resulting position.
    pub fn backup(&mut self, plies: &[PlyRecord], side: Color, outcome: GameOutcome) {
        for ply in plies.iter().rev() {
            if ply.mover != side {
                continue;
            }
            let (reward, next_max) = if ply.terminal {
                (outcome.reward_for(side), 0.0)
            } else {
                let delta = (ply.eval_after - ply.eval_before) as f64;
                (delta * self.reward_per_cp, self.table.max_value(&ply.key_after))
            };
            let old = self.table.get(&ply.key_before, &ply.mv);
            let target = reward + self.discount * next_max;
            self.table.set(
                &ply.key_before,
                &ply.mv,
                old + self.learning_rate * (target - old),
            );
        }
    }

    /// Geometric epsilon decay, applied once per completed game.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * EPSILON_DECAY).max(EPSILON_MIN);
    }
}

impl LearningAgent for TabularAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, pos: &Position, _side: Color) -> Option<Move> {
        self.select_move(pos)
    }

    fn learn_from_game(
        &mut self,
        record: &GameRecord,
        side: Color,
        _oracle: &mut dyn Oracle,
    ) -> Result<(), OracleError> {
        self.backup(&record.plies, side, record.outcome);
        self.decay_epsilon();
        Ok(())
    }

    fn note_illegal_move(&mut self, pos: &Position, mv: Move) {
        self.table
            .add(&pos.canonical_key(), &mv.to_string(), ILLEGAL_MOVE_PENALTY);
    }
}
