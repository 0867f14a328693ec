//! Mailbox grid read by the piece ruleset.
//!
//! `Board` owns the pieces, the cached king squares and the single pawn that
//! is currently capturable en passant. It performs no rule checking; the
//! move applier keeps it consistent.

use crate::game_state::chess_rules::STANDARD_BACK_RANK;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square, BOARD_SIZE};

const GRID: usize = BOARD_SIZE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    squares: [[Option<Piece>; GRID]; GRID],
    kings: [Option<Square>; 2],
    /// Square of the pawn that double-stepped on the previous half-move.
    pub en_passant: Option<Square>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial setup.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (column, kind) in STANDARD_BACK_RANK.iter().enumerate() {
                let square = Square::new(color.back_rank(), column as u8);
                board.put(Piece::new(*kind, color, square));
                let pawn_square = Square::new(color.pawn_start_row(), column as u8);
                board.put(Piece::new(PieceKind::Pawn, color, pawn_square));
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        if !square.in_bounds() {
            return None;
        }
        self.squares[square.row as usize][square.column as usize].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Store `piece` at its own coordinates, replacing whatever was there.
    /// Keeps the king cache in step.
    #[inline]
    pub fn put(&mut self, piece: Piece) -> Option<Piece> {
        let square = piece.square();
        if !square.in_bounds() {
            return None;
        }
        let previous = self.squares[square.row as usize][square.column as usize].replace(piece);
        self.forget_king(previous, square);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(square);
        }
        previous
    }

    /// Remove and return the piece at `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        if !square.in_bounds() {
            return None;
        }
        let taken = self.squares[square.row as usize][square.column as usize].take();
        self.forget_king(taken, square);
        taken
    }

    /// Move the piece at `from` to `to`, returning whatever stood on `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Option<Piece>> {
        let mut piece = self.take(from)?;
        piece.relocate(to);
        let displaced = self.take(to);
        self.put(piece);
        Some(displaced)
    }

    #[inline]
    fn forget_king(&mut self, removed: Option<Piece>, square: Square) {
        if let Some(piece) = removed {
            if piece.kind == PieceKind::King && self.kings[piece.color.index()] == Some(square) {
                self.kings[piece.color.index()] = None;
            }
        }
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Pieces of one color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.all_pieces().filter(move |piece| piece.color == color)
    }

    /// Every piece in row-major order.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().filter_map(Option::as_ref)
    }

    /// Scratch copy with `color`'s king moved to `to`, used to test whether
    /// the king would be attacked there.
    pub fn with_king_relocated(&self, color: Color, to: Square) -> Option<Board> {
        let from = self.king_square(color)?;
        let mut scratch = *self;
        scratch.relocate(from, to)?;
        Some(scratch)
    }
}
