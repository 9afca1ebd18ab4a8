//! Oracle adapter over an external UCI engine process.
//!
//! Spawns the engine, performs the `uci`/`isready` handshake, and then
//! serves [`Oracle`] queries by sending `position fen ...` + `go depth N`
//! and reading lines until `bestmove`. A reader thread feeds engine
//! output through a channel so every wait carries a hard timeout; a slow
//! or wedged engine surfaces as [`OracleError::Timeout`] instead of
//! hanging the run.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use agent_core::{Color, Move, Oracle, OracleError, Piece, Position, Score, Square};

#[cfg(test)]
mod lib_tests;

/// Default search depth requested from the engine.
pub const DEFAULT_ORACLE_DEPTH: u8 = 10;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Extracts the score from a UCI `info` line, still relative to the side
/// to move.
pub fn parse_info_score(line: &str) -> Option<Score> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("info") {
        return None;
    }
    while let Some(token) = tokens.next() {
        if token == "score" {
            return match tokens.next()? {
                "cp" => tokens.next()?.parse().ok().map(Score::Centipawns),
                "mate" => tokens.next()?.parse().ok().map(Score::MateIn),
                _ => None,
            };
        }
    }
    None
}

/// Extracts the move text from a `bestmove` line. The null move
/// placeholders engines emit for dead positions yield `None`.
pub fn parse_bestmove(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return None;
    }
    tokens.next().filter(|mv| *mv != "0000" && *mv != "(none)")
}

/// Flips a side-to-move-relative score to White's perspective.
pub fn to_white_pov(score: Score, side_to_move: Color) -> Score {
    match (score, side_to_move) {
        (s, Color::White) => s,
        (Score::Centipawns(cp), Color::Black) => Score::Centipawns(-cp),
        (Score::MateIn(m), Color::Black) => Score::MateIn(-m),
    }
}

/// Resolves engine move text against the current legal moves.
///
/// Engines castle king-to-destination (`e1g1`); the rules engine encodes
/// castling as king-takes-rook (`e1h1`), so a straight parse of a
/// castling move is never legal and gets translated.
pub fn resolve_uci_move(pos: &Position, text: &str) -> Option<Move> {
    let mv: Move = text.parse().ok()?;
    if pos.is_legal(mv) {
        return Some(mv);
    }
    if pos.board().piece_on(mv.from) == Some(Piece::King) {
        let rook = match (mv.from, mv.to) {
            (Square::E1, Square::G1) => Some(Square::H1),
            (Square::E1, Square::C1) => Some(Square::A1),
            (Square::E8, Square::G8) => Some(Square::H8),
            (Square::E8, Square::C8) => Some(Square::A8),
            _ => None,
        };
        if let Some(to) = rook {
            let castle = Move {
                from: mv.from,
                to,
                promotion: None,
            };
            if pos.is_legal(castle) {
                return Some(castle);
            }
        }
    }
    None
}

/// A UCI engine process wrapped as an [`Oracle`].
pub struct UciOracle {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    depth: u8,
    timeout: Duration,
}

impl UciOracle {
    /// Spawns `command` (program plus whitespace-separated arguments) and
    /// runs the UCI handshake to completion.
    pub fn spawn(command: &str) -> Result<Self, OracleError> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| OracleError::Protocol("empty oracle command".into()))?;
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let stdin = child.stdin.take().ok_or(OracleError::Terminated)?;
        let stdout = child.stdout.take().ok_or(OracleError::Terminated)?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // Ends when the engine closes stdout or the oracle is dropped.
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut oracle = Self {
            child,
            stdin,
            lines: rx,
            depth: DEFAULT_ORACLE_DEPTH,
            timeout: DEFAULT_TIMEOUT,
        };
        oracle.send("uci")?;
        oracle.wait_for(|line| line == "uciok")?;
        oracle.send("isready")?;
        oracle.wait_for(|line| line == "readyok")?;
        tracing::debug!(command, "oracle engine ready");
        Ok(oracle)
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn send(&mut self, command: &str) -> Result<(), OracleError> {
        tracing::trace!(command, "-> oracle");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Collects lines until `done` matches, honoring the request timeout.
    fn wait_for(&mut self, done: impl Fn(&str) -> bool) -> Result<Vec<String>, OracleError> {
        let deadline = Instant::now() + self.timeout;
        let mut seen = Vec::new();
        loop {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .ok_or(OracleError::Timeout(self.timeout))?;
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    tracing::trace!(line = %line, "<- oracle");
                    let finished = done(line.trim());
                    seen.push(line);
                    if finished {
                        return Ok(seen);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(OracleError::Timeout(self.timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(OracleError::Terminated),
            }
        }
    }

    /// One `position` + `go` exchange: the last reported score and the
    /// engine's chosen move, if any.
    fn search(&mut self, pos: &Position) -> Result<(Option<Score>, Option<String>), OracleError> {
        self.send(&format!("position fen {}", pos.fen()))?;
        self.send(&format!("go depth {}", self.depth))?;
        let lines = self.wait_for(|line| line.starts_with("bestmove"))?;

        let mut score = None;
        let mut best = None;
        for line in &lines {
            if let Some(s) = parse_info_score(line) {
                score = Some(s);
            }
            if let Some(mv) = parse_bestmove(line) {
                best = Some(mv.to_string());
            }
        }
        Ok((score, best))
    }
}

impl Oracle for UciOracle {
    fn evaluate(&mut self, pos: &Position) -> Result<Score, OracleError> {
        // Engines won't search a finished game; score it directly.
        if pos.is_checkmate() {
            return Ok(if pos.side_to_move() == Color::White {
                Score::MateIn(-1)
            } else {
                Score::MateIn(1)
            });
        }
        if pos.is_game_over() {
            return Ok(Score::Centipawns(0));
        }

        let (score, _) = self.search(pos)?;
        let score =
            score.ok_or_else(|| OracleError::Protocol("no score before bestmove".into()))?;
        Ok(to_white_pov(score, pos.side_to_move()))
    }

    fn best_move(&mut self, pos: &Position) -> Result<Move, OracleError> {
        let (_, best) = self.search(pos)?;
        let text =
            best.ok_or_else(|| OracleError::Protocol("engine sent no playable move".into()))?;
        resolve_uci_move(pos, &text)
            .ok_or_else(|| OracleError::Protocol(format!("unplayable bestmove `{text}`")))
    }
}

impl Drop for UciOracle {
    fn drop(&mut self) {
        let _ = self.send("quit");
        thread::sleep(Duration::from_millis(50));
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
