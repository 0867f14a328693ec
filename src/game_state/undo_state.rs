//! Undo records pushed by `make_move` and popped by `undo`.

use crate::game_state::chess_types::{Move, Piece, Square};
use crate::game_state::position::StatusCache;

/// Single undo record for `make_move` / `undo`.
#[derive(Debug, Clone)]
pub struct UndoState {
    /// The applied move with its application-time flags filled in.
    pub mv: Move,
    /// The moving piece as it was before the move. Restoring it also undoes
    /// a promotion.
    pub moved_piece: Piece,
    /// Captured piece; its own coordinates name the square it was taken
    /// from, which differs from `mv.to` for en passant.
    pub captured_piece: Option<Piece>,
    /// Castling rook before the move, and the square it was moved to.
    pub castling_rook: Option<(Piece, Square)>,

    pub prev_en_passant: Option<Square>,
    pub prev_status: StatusCache,
}
