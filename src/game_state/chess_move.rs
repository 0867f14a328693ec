//! Move value type.
//!
//! A `Move` is identified by its source, destination and optional promotion
//! kind. The remaining flags are filled in when the move is applied and are
//! ignored by equality and hashing, so a move typed by a user compares equal
//! to the same move in a legal-move list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::{move_to_long_algebraic, parse_long_algebraic_move};

#[derive(Debug, Clone, Copy, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub first_move: bool,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_castling: false,
            is_en_passant: false,
            first_move: false,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        let mut mv = Self::new(from, to);
        mv.promotion = Some(promotion);
        mv
    }

    /// Build a move from raw grid coordinates.
    #[inline]
    pub const fn from_coords(from_row: u8, from_column: u8, to_row: u8, to_column: u8) -> Self {
        Self::new(
            Square::new(from_row, from_column),
            Square::new(to_row, to_column),
        )
    }

    #[inline]
    pub fn d_row(&self) -> i8 {
        self.to.row as i8 - self.from.row as i8
    }

    #[inline]
    pub fn d_column(&self) -> i8 {
        self.to.column as i8 - self.from.column as i8
    }

    /// Copy of this move with the application-time flags cleared.
    #[inline]
    pub const fn plain(&self) -> Self {
        let mut mv = Self::new(self.from, self.to);
        mv.promotion = self.promotion;
        mv
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(self))
    }
}

impl FromStr for Move {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_long_algebraic_move(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_application_flags() {
        let mut applied = Move::from_coords(6, 4, 4, 4);
        applied.first_move = true;
        applied.is_castling = true;
        assert_eq!(applied, Move::from_coords(6, 4, 4, 4));

        let queen = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::Queen);
        let rook = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::Rook);
        assert_ne!(queen, rook);
    }

    #[test]
    fn parses_and_prints_long_algebraic() {
        let mv: Move = "e2e4".parse().expect("e2e4 should parse");
        assert_eq!(mv, Move::from_coords(6, 4, 4, 4));
        assert_eq!(mv.to_string(), "e2e4");

        let promo: Move = "a7a8q".parse().expect("a7a8q should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "a7a8q");
    }
}
