//! Per-piece movement legality.
//!
//! `check_move` is pure geometry over a `Board`: it never mutates, and it
//! does not consider whether the move leaves the mover's own king in check.
//! Self-check filtering is layered on top by the move applier.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Piece, PieceKind};
use crate::moves::bishop_moves::bishop_move_is_legal;
use crate::moves::king_moves::{king_move_is_legal, king_step_is_legal};
use crate::moves::knight_moves::knight_move_is_legal;
use crate::moves::pawn_moves::pawn_move_is_legal;
use crate::moves::queen_moves::queen_move_is_legal;
use crate::moves::rook_moves::rook_move_is_legal;

/// Geometric legality of `mv` for the piece standing on its source square.
pub fn check_move(board: &Board, mv: &Move) -> bool {
    let Some(piece) = board.piece_at(mv.from) else {
        return false;
    };
    base_rule(board, piece, mv) && piece_rule(board, piece, mv)
}

/// Rules shared by every piece: destination on the grid, not the source
/// square, and not occupied by a piece of the mover's color.
#[inline]
pub fn base_rule(board: &Board, piece: &Piece, mv: &Move) -> bool {
    if !mv.from.in_bounds() || !mv.to.in_bounds() || mv.from == mv.to {
        return false;
    }
    !matches!(board.piece_at(mv.to), Some(target) if target.color == piece.color)
}

#[inline]
fn piece_rule(board: &Board, piece: &Piece, mv: &Move) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_move_is_legal(board, piece, mv),
        PieceKind::Knight => knight_move_is_legal(mv.d_row(), mv.d_column()),
        PieceKind::Bishop => bishop_move_is_legal(board, mv),
        PieceKind::Rook => rook_move_is_legal(board, mv),
        PieceKind::Queen => queen_move_is_legal(board, mv),
        PieceKind::King => king_move_is_legal(board, piece, mv),
    }
}

/// True when no piece stands strictly between source and destination.
/// Only meaningful for moves along a rank, file or diagonal.
pub fn path_is_clear(board: &Board, mv: &Move) -> bool {
    let step_row = mv.d_row().signum();
    let step_column = mv.d_column().signum();
    let mut square = mv.from;
    loop {
        square = match square.offset(step_row, step_column) {
            Some(next) => next,
            None => return false,
        };
        if square == mv.to {
            return true;
        }
        if !board.is_empty(square) {
            return false;
        }
    }
}

/// Whether `attacker` can capture on its target square by geometry alone.
/// A king contributes only its one-square reach because castling never
/// captures.
#[inline]
fn attacks(board: &Board, attacker: &Piece, mv: &Move) -> bool {
    match attacker.kind {
        PieceKind::King => {
            base_rule(board, attacker, mv) && king_step_is_legal(mv.d_row(), mv.d_column())
        }
        _ => base_rule(board, attacker, mv) && piece_rule(board, attacker, mv),
    }
}

/// True iff any enemy piece's move rule targets `color`'s king square.
/// A board without that king reports no check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_square(color) else {
        return false;
    };
    board.pieces(color.opposite()).any(|enemy| {
        let mv = Move::new(enemy.square(), king_square);
        attacks(board, enemy, &mv)
    })
}
