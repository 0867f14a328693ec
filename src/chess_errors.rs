//! Errors used throughout the chess engine.
//!
//! Ordinary rule rejections are not errors: `make_move` and `is_valid`
//! report them as `Ok(false)`. The variants below cover malformed input
//! (setup, FEN, coordinate text) and invariant violations, which indicate a
//! defect in the engine or its caller and abort the current operation.

use thiserror::Error;

use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::{Color, Square};

/// Unified error type for the chess engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A coordinate outside the 8x8 grid was used where a real square is required.
    #[error("square ({row}, {column}) is off the board")]
    OffBoard { row: i16, column: i16 },

    /// Setup tried to place a piece onto a square that is already occupied.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// Setup tried to place a second king of one color.
    #[error("{0:?} already has a king on the board")]
    DuplicateKing(Color),

    /// A color has no king on the board.
    #[error("{0:?} king is missing from the board")]
    MissingKing(Color),

    /// A move tried to capture a piece of its own color outside castling.
    #[error("move {0} would capture a piece of the mover's own color")]
    SameColorCapture(Move),

    /// Undo found no piece (or the wrong piece) where the record expects one.
    #[error("undo of {mv} expected a piece at {square}")]
    MissingPieceOnUndo { mv: Move, square: Square },

    /// A prepared move found no piece where it expected one while applying.
    #[error("applying {mv} expected a piece at {square}")]
    MissingPieceOnApply { mv: Move, square: Square },

    /// Undo was called with an empty undo stack.
    #[error("undo requested with no moves on the undo stack")]
    EmptyUndoStack,

    /// A move taken from a legal-move list was rejected on application.
    #[error("move {0} was listed as legal but could not be applied")]
    LegalMoveRejected(Move),

    /// Search was asked for a move in a position with no legal moves.
    #[error("no legal moves available for {0:?}")]
    NoLegalMoves(Color),

    /// An engine returned a move that is not legal in the current position.
    #[error("engine {engine} returned illegal move {mv}")]
    EngineReturnedIllegalMove { engine: String, mv: Move },

    /// An engine produced no move although legal moves exist.
    #[error("engine {0} returned no move")]
    EngineReturnedNoMove(String),

    /// The background search worker panicked.
    #[error("background search worker terminated abnormally")]
    WorkerPanicked,

    /// A single character in a coordinate string was invalid.
    #[error("invalid algebraic character {0:?}")]
    InvalidAlgebraicChar(char),

    /// A coordinate or move string failed to parse.
    #[error("invalid algebraic string {0:?}")]
    InvalidAlgebraicString(String),

    /// A FEN string failed to parse.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

pub type ChessResult<T> = Result<T, ChessErrors>;
