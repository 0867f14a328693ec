//! Rook movement: rank and file slides blocked by any piece in between.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Move;
use crate::moves::move_rules::path_is_clear;

/// Rank or file line with nothing strictly between source and destination.
#[inline]
pub fn rook_move_is_legal(board: &Board, mv: &Move) -> bool {
    let (d_row, d_column) = (mv.d_row(), mv.d_column());
    (d_row == 0) != (d_column == 0) && path_is_clear(board, mv)
}
