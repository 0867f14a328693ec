//! Pawn geometry: single and double pushes, diagonal captures and the en
//! passant capture of a pawn that double-stepped on the previous half-move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Move, Piece, PieceKind, Square};

pub fn pawn_move_is_legal(board: &Board, pawn: &Piece, mv: &Move) -> bool {
    let forward = pawn.color.forward();
    let (d_row, d_column) = (mv.d_row(), mv.d_column());

    if d_column == 0 {
        if d_row == forward {
            return board.is_empty(mv.to);
        }
        if d_row == 2 * forward && mv.from.row == pawn.color.pawn_start_row() {
            let passed = Square::new((mv.from.row as i8 + forward) as u8, mv.from.column);
            return board.is_empty(passed) && board.is_empty(mv.to);
        }
        return false;
    }

    if d_row != forward || d_column.abs() != 1 {
        return false;
    }

    match board.piece_at(mv.to) {
        Some(target) => target.color != pawn.color,
        None => en_passant_victim(board, pawn, mv).is_some(),
    }
}

/// Square of the pawn an en passant capture would remove, if `mv` is one.
pub fn en_passant_victim(board: &Board, pawn: &Piece, mv: &Move) -> Option<Square> {
    if pawn.kind != PieceKind::Pawn
        || mv.d_column().abs() != 1
        || mv.d_row() != pawn.color.forward()
        || !board.is_empty(mv.to)
    {
        return None;
    }

    let victim_square = Square::new(mv.from.row, mv.to.column);
    if board.en_passant != Some(victim_square) {
        return None;
    }
    match board.piece_at(victim_square) {
        Some(victim) if victim.kind == PieceKind::Pawn && victim.color != pawn.color => {
            Some(victim_square)
        }
        _ => None,
    }
}

/// True when a pawn move lands on the promotion row.
#[inline]
pub fn is_promotion_move(pawn: &Piece, mv: &Move) -> bool {
    pawn.kind == PieceKind::Pawn && mv.to.row == pawn.color.promotion_row()
}

/// True when a pawn move is the two-square advance from its start row.
#[inline]
pub fn is_double_step(pawn: &Piece, mv: &Move) -> bool {
    pawn.kind == PieceKind::Pawn && mv.d_column() == 0 && mv.d_row() == 2 * pawn.color.forward()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    fn pawn_board() -> Board {
        let mut board = Board::empty();
        board.put(Piece::new(PieceKind::Pawn, Color::White, Square::new(6, 3)));
        board.put(Piece::new(PieceKind::Pawn, Color::Black, Square::new(5, 4)));
        board.put(Piece::new(PieceKind::Pawn, Color::White, Square::new(4, 0)));
        board
    }

    #[test]
    fn pushes_require_empty_squares() {
        let mut board = pawn_board();
        let pawn = *board.piece_at(Square::new(6, 3)).expect("pawn");
        assert!(pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 5, 3)));
        assert!(pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 4, 3)));
        assert!(!pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 7, 3)));

        board.put(Piece::new(PieceKind::Knight, Color::Black, Square::new(5, 3)));
        assert!(!pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 5, 3)));
        assert!(!pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 4, 3)));
    }

    #[test]
    fn double_step_only_from_the_start_row() {
        let board = pawn_board();
        let pawn = *board.piece_at(Square::new(4, 0)).expect("pawn");
        assert!(!pawn_move_is_legal(&board, &pawn, &Move::from_coords(4, 0, 2, 0)));
        assert!(pawn_move_is_legal(&board, &pawn, &Move::from_coords(4, 0, 3, 0)));
    }

    #[test]
    fn diagonal_needs_an_enemy_or_en_passant() {
        let mut board = pawn_board();
        let pawn = *board.piece_at(Square::new(6, 3)).expect("pawn");
        assert!(pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 5, 4)));
        assert!(!pawn_move_is_legal(&board, &pawn, &Move::from_coords(6, 3, 5, 2)));

        let runner = *board.piece_at(Square::new(4, 0)).expect("pawn");
        board.put(Piece::new(PieceKind::Pawn, Color::Black, Square::new(4, 1)));
        let capture = Move::from_coords(4, 0, 3, 1);
        assert!(!pawn_move_is_legal(&board, &runner, &capture));
        board.en_passant = Some(Square::new(4, 1));
        assert!(pawn_move_is_legal(&board, &runner, &capture));
        assert_eq!(
            en_passant_victim(&board, &runner, &capture),
            Some(Square::new(4, 1))
        );
    }
}
