//! Canned first and reactive moves.
//!
//! An automated player starts in `Opening` or `Defence` mode and plays the
//! single canned move for its color, then continues in `Standard` mode with
//! search. The lookups need no board access beyond the color.

use crate::game_state::chess_types::{Color, Move};

/// How the automated player picks its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveType {
    /// Canned king's-pawn style first move.
    Opening,
    /// Canned queen's-pawn style reply.
    Defence,
    /// Search-driven.
    #[default]
    Standard,
}

/// White e2e4, Black d7d5.
#[inline]
pub const fn opening_move(color: Color) -> Move {
    match color {
        Color::White => Move::from_coords(6, 4, 4, 4),
        Color::Black => Move::from_coords(1, 3, 3, 3),
    }
}

/// White d2d4, Black e7e5.
#[inline]
pub const fn defence_move(color: Color) -> Move {
    match color {
        Color::White => Move::from_coords(6, 3, 4, 3),
        Color::Black => Move::from_coords(1, 4, 3, 4),
    }
}

/// Canned move for `move_type`, or `None` for `Standard`.
#[inline]
pub const fn canned_move(move_type: MoveType, color: Color) -> Option<Move> {
    match move_type {
        MoveType::Opening => Some(opening_move(color)),
        MoveType::Defence => Some(defence_move(color)),
        MoveType::Standard => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position::Position;

    #[test]
    fn canned_moves_are_legal_from_the_start() {
        for move_type in [MoveType::Opening, MoveType::Defence] {
            let mut position = Position::new_game();
            let white = canned_move(move_type, Color::White).expect("canned move");
            assert!(position.make_move(&white).expect("white canned move"));
            let black = canned_move(move_type, Color::Black).expect("canned move");
            assert!(position.make_move(&black).expect("black canned move"));
        }
        assert_eq!(canned_move(MoveType::Standard, Color::White), None);
    }
}
