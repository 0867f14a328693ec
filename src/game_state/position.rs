//! Position: the grid, side to move, status cache and undo log.
//!
//! A `Position` is mutated only through the move applier
//! (`move_generation::legal_move_apply`) once play starts. The setup helpers
//! here exist for hand-placed fixtures and the FEN parser.

use std::fmt;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Per-color status and legal-move lists, valid only for the color recorded
/// in `computed_for` and only until the next mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCache {
    pub status: [BoardStatus; 2],
    pub legal_moves: [Vec<Move>; 2],
    pub computed_for: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) ply: u32,
    pub(crate) cache: StatusCache,
    pub(crate) undo_stack: Vec<UndoState>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Position {
    /// Empty grid with White to move, for hand-placed fixtures.
    pub fn new_empty() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            ply: 0,
            cache: StatusCache::default(),
            undo_stack: Vec::new(),
        }
    }

    /// Standard initial setup with White to move.
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            ..Self::new_empty()
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Setup ---

    pub fn place_piece(&mut self, kind: PieceKind, color: Color, square: Square) -> ChessResult<()> {
        self.place(Piece::new(kind, color, square))
    }

    /// Place a fully specified piece (including its has-moved flag).
    pub fn place(&mut self, piece: Piece) -> ChessResult<()> {
        let square = piece.square();
        if !square.in_bounds() {
            return Err(ChessErrors::OffBoard {
                row: square.row as i16,
                column: square.column as i16,
            });
        }
        if !self.board.is_empty(square) {
            return Err(ChessErrors::SquareOccupied(square));
        }
        if piece.kind == PieceKind::King && self.board.king_square(piece.color).is_some() {
            return Err(ChessErrors::DuplicateKing(piece.color));
        }
        self.board.put(piece);
        self.invalidate_status();
        Ok(())
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.side_to_move = color;
            self.invalidate_status();
        }
    }

    /// Flag the pawn on `square` as capturable en passant.
    pub fn set_en_passant_pawn(&mut self, square: Option<Square>) -> ChessResult<()> {
        if let Some(square) = square {
            match self.board.piece_at(square) {
                Some(piece) if piece.kind == PieceKind::Pawn => {}
                _ => {
                    return Err(ChessErrors::InvalidFen(format!(
                        "no pawn on {square} to capture en passant"
                    )))
                }
            }
        }
        self.board.en_passant = square;
        self.invalidate_status();
        Ok(())
    }

    pub(crate) fn set_ply(&mut self, ply: u32) {
        self.ply = ply;
    }

    #[inline]
    pub(crate) fn invalidate_status(&mut self) {
        self.cache = StatusCache::default();
    }

    // --- Accessors ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.side_to_move
    }

    /// Half-moves applied since setup.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn en_passant_pawn(&self) -> Option<Square> {
        self.board.en_passant
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_square(color)
    }

    #[inline]
    pub fn status_is_current(&self) -> bool {
        self.cache.computed_for == Some(self.side_to_move)
    }

    /// Status from the cache, or `None` when the cache is stale.
    #[inline]
    pub fn cached_status(&self, color: Color) -> Option<BoardStatus> {
        self.status_is_current()
            .then(|| self.cache.status[color.index()])
    }

    /// Status for `color`, recomputing the cache if it is stale.
    pub fn status(&mut self, color: Color) -> ChessResult<BoardStatus> {
        self.ensure_board_status()?;
        Ok(self.cache.status[color.index()])
    }

    /// Legal moves for the side to move, recomputing the cache if stale.
    pub fn legal_moves(&mut self) -> ChessResult<&[Move]> {
        self.ensure_board_status()?;
        Ok(&self.cache.legal_moves[self.side_to_move.index()])
    }

    /// Containment test against the legal-move list.
    pub fn is_legal(&mut self, mv: &Move) -> ChessResult<bool> {
        Ok(self.legal_moves()?.contains(mv))
    }

    /// Most recently applied move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.undo_stack.last().map(|record| &record.mv)
    }

    /// Piece captured by the most recent move, if any.
    #[inline]
    pub fn last_capture(&self) -> Option<&Piece> {
        self.undo_stack
            .last()
            .and_then(|record| record.captured_piece.as_ref())
    }

    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Applied moves, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = &Move> + '_ {
        self.undo_stack.iter().map(|record| &record.mv)
    }

    /// Snapshot with an empty undo log, for handing to another thread.
    pub fn snapshot(&self) -> Self {
        Self {
            undo_stack: Vec::new(),
            ..self.clone()
        }
    }
}

/// Canonical serialization: side to move, ply, en passant pawn, then every
/// piece in row-major order with its has-moved flag.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.side_to_move, self.ply)?;
        match self.board.en_passant {
            Some(square) => write!(f, " ep={square}")?,
            None => write!(f, " ep=-")?,
        }
        for piece in self.board.all_pieces() {
            write!(
                f,
                " {}{}{}",
                piece.fen_char(),
                piece.square(),
                if piece.has_moved { "*" } else { "" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STANDARD_BACK_RANK;

    #[test]
    fn standard_setup_places_every_piece() {
        let position = Position::new_game();
        let mut counts = [[0usize; 6]; 2];
        for piece in position.board().all_pieces() {
            counts[piece.color.index()][piece.kind.index()] += 1;
            assert_eq!(position.piece_at(piece.square()), Some(piece));
        }
        for color in Color::ALL {
            assert_eq!(counts[color.index()], [8, 2, 2, 2, 1, 1]);
        }

        let back = STANDARD_BACK_RANK;
        for column in 0..8u8 {
            let white = position.piece_at(Square::new(7, column)).expect("white back rank");
            let black = position.piece_at(Square::new(0, column)).expect("black back rank");
            assert_eq!((white.kind, white.color), (back[column as usize], Color::White));
            assert_eq!((black.kind, black.color), (back[column as usize], Color::Black));
            let pawn = position.piece_at(Square::new(6, column)).expect("white pawn");
            assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
            let pawn = position.piece_at(Square::new(1, column)).expect("black pawn");
            assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::Black));
            for row in 2..6u8 {
                assert!(position.piece_at(Square::new(row, column)).is_none());
            }
        }
        assert_eq!(position.turn(), Color::White);
    }

    #[test]
    fn new_game_has_twenty_legal_moves() {
        let mut position = Position::new_game();
        assert_eq!(position.legal_moves().expect("status").len(), 20);
        assert_eq!(
            position.status(Color::White).expect("status"),
            BoardStatus::NotInCheck
        );
        assert!(position.status_is_current());
    }

    #[test]
    fn setup_rejects_occupied_squares_and_second_kings() {
        let mut position = Position::new_empty();
        position
            .place_piece(PieceKind::King, Color::White, Square::new(7, 4))
            .expect("first king should place");
        assert_eq!(
            position.place_piece(PieceKind::Rook, Color::Black, Square::new(7, 4)),
            Err(ChessErrors::SquareOccupied(Square::new(7, 4)))
        );
        assert_eq!(
            position.place_piece(PieceKind::King, Color::White, Square::new(0, 0)),
            Err(ChessErrors::DuplicateKing(Color::White))
        );
        assert!(matches!(
            position.place_piece(PieceKind::Pawn, Color::White, Square::new(8, 0)),
            Err(ChessErrors::OffBoard { .. })
        ));
    }

    #[test]
    fn serialization_reflects_turn_and_pieces() {
        let mut position = Position::new_empty();
        position
            .place_piece(PieceKind::King, Color::Black, Square::new(0, 0))
            .expect("place");
        position
            .place_piece(PieceKind::Queen, Color::White, Square::new(4, 4))
            .expect("place");
        assert_eq!(position.to_string(), "White 0 ep=- ka8 Qe4");
        position.set_side_to_move(Color::Black);
        assert_eq!(position.to_string(), "Black 0 ep=- ka8 Qe4");
    }
}
