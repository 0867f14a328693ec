//! King geometry and castling.
//!
//! Castling is expressed as the king's two-square step along its back rank
//! (column 4 to 6 king-side, 4 to 2 queen-side). The rook involved starts on
//! column 7 or 0 and finishes on column 5 or 3.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Piece, PieceKind, Square};
use crate::moves::move_rules::is_in_check;

pub const KING_HOME_COLUMN: u8 = 4;

/// (d_row, d_column) of every one-square king step.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook squares involved in a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRook {
    pub from: Square,
    pub to: Square,
    /// Square the king passes over between its start and destination.
    pub crossed: Square,
}

#[inline]
pub const fn king_step_is_legal(d_row: i8, d_column: i8) -> bool {
    d_row.abs() <= 1 && d_column.abs() <= 1 && (d_row != 0 || d_column != 0)
}

/// Rook squares for a castling destination, or `None` if `mv` is not shaped
/// like a castling move for `color`.
pub fn castling_rook(color: Color, mv: &Move) -> Option<CastlingRook> {
    let rank = color.back_rank();
    if mv.from != Square::new(rank, KING_HOME_COLUMN) || mv.to.row != rank {
        return None;
    }
    match mv.to.column {
        6 => Some(CastlingRook {
            from: Square::new(rank, 7),
            to: Square::new(rank, 5),
            crossed: Square::new(rank, 5),
        }),
        2 => Some(CastlingRook {
            from: Square::new(rank, 0),
            to: Square::new(rank, 3),
            crossed: Square::new(rank, 3),
        }),
        _ => None,
    }
}

/// Translate a king dropped onto its own castling rook into the two-square
/// castling move. Any other move is returned unchanged.
pub fn normalize_castling_alias(board: &Board, mv: &Move) -> Move {
    let Some(king) = board.piece_at(mv.from) else {
        return *mv;
    };
    let rank = king.color.back_rank();
    if king.kind != PieceKind::King
        || mv.from != Square::new(rank, KING_HOME_COLUMN)
        || mv.to.row != rank
    {
        return *mv;
    }
    let column = match mv.to.column {
        7 => 6,
        0 => 2,
        _ => return *mv,
    };
    match board.piece_at(mv.to) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color => {
            Move::new(mv.from, Square::new(rank, column))
        }
        _ => *mv,
    }
}

pub fn king_move_is_legal(board: &Board, king: &Piece, mv: &Move) -> bool {
    king_step_is_legal(mv.d_row(), mv.d_column()) || castling_is_legal(board, king, mv)
}

/// Composite castling test: king and rook unmoved on their original squares,
/// nothing between them, king not in check, and neither the crossed square
/// nor the destination attacked.
pub fn castling_is_legal(board: &Board, king: &Piece, mv: &Move) -> bool {
    if king.kind != PieceKind::King || king.has_moved {
        return false;
    }
    let Some(castle) = castling_rook(king.color, mv) else {
        return false;
    };

    match board.piece_at(castle.from) {
        Some(rook)
            if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return false,
    }

    let rank = castle.from.row;
    let (low, high) = if castle.from.column < KING_HOME_COLUMN {
        (castle.from.column + 1, KING_HOME_COLUMN)
    } else {
        (KING_HOME_COLUMN + 1, castle.from.column)
    };
    if (low..high).any(|column| !board.is_empty(Square::new(rank, column))) {
        return false;
    }

    if is_in_check(board, king.color) {
        return false;
    }

    [castle.crossed, mv.to].iter().all(|square| {
        board
            .with_king_relocated(king.color, *square)
            .is_some_and(|scratch| !is_in_check(&scratch, king.color))
    })
}
