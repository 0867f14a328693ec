//! Piece record stored on the board grid.

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// A piece on the grid. The (row, column) it carries always matches the grid
/// cell that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub row: u8,
    pub column: u8,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            row: square.row,
            column: square.column,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn square(&self) -> Square {
        Square::new(self.row, self.column)
    }

    #[inline]
    pub fn relocate(&mut self, square: Square) {
        self.row = square.row;
        self.column = square.column;
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    pub fn fen_char(&self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }
}
