//! Immutable position snapshots over the rules engine.
//!
//! The rules engine (`cozy-chess`) owns move legality, board state, and
//! hashing. This adapter adds what the agents need on top: a canonical
//! key for tabular lookups, repetition tracking along the game line, and
//! terminal-status predicates with the draw semantics the evaluator and
//! orchestrator share.

use cozy_chess::{Board, Color, FenParseError, Move, Piece, Square};

/// Number of times a position must occur for a repetition draw.
const REPETITION_DRAW_COUNT: usize = 3;

/// An immutable snapshot of the game state.
///
/// `apply` returns a fresh snapshot; nothing mutates in place, so search
/// can explore a move and "undo" it by simply dropping the child.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    /// Zobrist hashes of every position on the game line, this one included.
    history: Vec<u64>,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        let board = Board::default();
        let hash = board.hash();
        Self {
            board,
            history: vec![hash],
        }
    }

    /// Parses a FEN string into a position with a fresh history.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let board: Board = fen.parse()?;
        let hash = board.hash();
        Ok(Self {
            board,
            history: vec![hash],
        })
    }

    /// Access to the underlying rules-engine board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// All legal moves in the rules engine's generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Applies a legal move, returning the resulting snapshot.
    ///
    /// The move must come from [`Position::legal_moves`]; applying an
    /// illegal move panics in the rules engine.
    pub fn apply(&self, mv: Move) -> Position {
        let mut board = self.board.clone();
        board.play(mv);
        let mut history = self.history.clone();
        history.push(board.hash());
        Position { board, history }
    }

    /// Whether `mv` lands on an enemy-occupied square.
    ///
    /// En passant is not counted; this feeds the move-ordering heuristic
    /// only, where the distinction is irrelevant.
    pub fn is_capture(&self, mv: Move) -> bool {
        self.board.colors(!self.board.side_to_move()).has(mv.to)
    }

    pub fn is_checkmate(&self) -> bool {
        !self.board.checkers().is_empty() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        self.board.checkers().is_empty() && self.legal_moves().is_empty()
    }

    /// Neither side can possibly deliver mate: no pawns, rooks, or queens,
    /// and at most one minor piece on the board.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let majors =
            b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !majors.is_empty() {
            return false;
        }
        let minors = b.pieces(Piece::Knight) | b.pieces(Piece::Bishop);
        minors.len() <= 1
    }

    /// Threefold repetition along the game line, or the 50-move rule.
    pub fn is_draw_by_repetition_or_move_limit(&self) -> bool {
        if self.board.halfmove_clock() >= 100 {
            return true;
        }
        let current = *self.history.last().expect("history is never empty");
        self.history.iter().filter(|&&h| h == current).count() >= REPETITION_DRAW_COUNT
    }

    pub fn is_game_over(&self) -> bool {
        self.is_draw_by_repetition_or_move_limit()
            || self.is_insufficient_material()
            || self.legal_moves().is_empty()
    }

    /// Canonical key: the FEN with the move counters stripped, so that
    /// transpositions differing only in clock state share table entries.
    pub fn canonical_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace()
            .take(4)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn fen(&self) -> String {
        format!("{}", self.board)
    }

    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    pub fn piece_count(&self, color: Color, piece: Piece) -> u32 {
        (self.board.colors(color) & self.board.pieces(piece)).len()
    }

    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.board.color_on(sq)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
