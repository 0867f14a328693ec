//! Queen movement as the union of the bishop and rook rules.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Move;
use crate::moves::bishop_moves::bishop_move_is_legal;
use crate::moves::rook_moves::rook_move_is_legal;

/// Queen moves are the union of rook and bishop lines.
#[inline]
pub fn queen_move_is_legal(board: &Board, mv: &Move) -> bool {
    rook_move_is_legal(board, mv) || bishop_move_is_legal(board, mv)
}
