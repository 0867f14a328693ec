//! Move application and reversal.
//!
//! Every applied move pushes an `UndoState`; `undo` pops the top record and
//! performs the exact inverse. The status cache that was current before the
//! move travels with the record, so undo restores it without recomputing.

use std::mem;

use tracing::trace;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::undo_state::UndoState;
use crate::moves::king_moves::castling_rook;
use crate::moves::pawn_moves::is_double_step;

/// Flags controlling a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOptions {
    pub check_king_safety: bool,
    pub recompute_status: bool,
}

impl MoveOptions {
    /// Real move: reject self-check, recompute status afterwards.
    pub const REAL: Self = Self {
        check_king_safety: true,
        recompute_status: true,
    };

    /// Speculation: no king-safety test, no status recomputation.
    pub const SPECULATIVE: Self = Self {
        check_king_safety: false,
        recompute_status: false,
    };
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self::REAL
    }
}

impl Position {
    /// Validate and apply `mv` as a real move. `Ok(false)` means the move was
    /// rejected and nothing changed.
    pub fn make_move(&mut self, mv: &Move) -> ChessResult<bool> {
        self.make_move_with(mv, MoveOptions::REAL)
    }

    pub fn make_move_with(&mut self, mv: &Move, options: MoveOptions) -> ChessResult<bool> {
        match self.prepare_move(mv, options.check_king_safety)? {
            Ok(prepared) => {
                self.apply_prepared(prepared, options.recompute_status)?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Revert the most recent move and recompute status if the restored
    /// cache is stale.
    pub fn undo(&mut self) -> ChessResult<Move> {
        self.undo_with(true)
    }

    pub fn undo_with(&mut self, recompute_status: bool) -> ChessResult<Move> {
        let record = self.undo_stack.pop().ok_or(ChessErrors::EmptyUndoStack)?;
        let mv = record.mv;

        if self.board.take(mv.to).is_none() {
            return Err(ChessErrors::MissingPieceOnUndo { mv, square: mv.to });
        }
        self.board.put(record.moved_piece);

        if let Some((rook, rook_to)) = record.castling_rook {
            if self.board.take(rook_to).is_none() {
                return Err(ChessErrors::MissingPieceOnUndo {
                    mv,
                    square: rook_to,
                });
            }
            self.board.put(rook);
        }

        if let Some(captured) = record.captured_piece {
            self.board.put(captured);
        }

        if self.board.en_passant != record.prev_en_passant {
            trace!(from = ?self.board.en_passant, to = ?record.prev_en_passant, "en passant restored");
        }
        self.board.en_passant = record.prev_en_passant;
        self.side_to_move = self.side_to_move.opposite();
        self.ply = self.ply.saturating_sub(1);
        self.cache = record.prev_status;

        if recompute_status && !self.status_is_current() {
            self.update_board_status()?;
        }
        Ok(mv)
    }

    /// Apply a move already resolved by `prepare_move`.
    pub(crate) fn apply_prepared(&mut self, mv: Move, recompute_status: bool) -> ChessResult<()> {
        let moved_piece = *self
            .board
            .piece_at(mv.from)
            .ok_or(ChessErrors::MissingPieceOnApply { mv, square: mv.from })?;

        let capture_square = if mv.is_en_passant {
            Square::new(mv.from.row, mv.to.column)
        } else {
            mv.to
        };
        if let Some(target) = self.board.piece_at(capture_square) {
            if target.color == moved_piece.color {
                return Err(ChessErrors::SameColorCapture(mv));
            }
        }

        let castle = if mv.is_castling {
            castling_rook(moved_piece.color, &mv)
        } else {
            None
        };

        let captured_piece = self.board.take(capture_square);

        let mut castling_record = None;
        if let Some(castle) = castle {
            let rook = self
                .board
                .take(castle.from)
                .ok_or(ChessErrors::MissingPieceOnApply {
                    mv,
                    square: castle.from,
                })?;
            let mut moved_rook = rook;
            moved_rook.relocate(castle.to);
            moved_rook.has_moved = true;
            self.board.put(moved_rook);
            castling_record = Some((rook, castle.to));
        }

        self.board.take(mv.from);
        let mut arriving = match mv.promotion {
            Some(kind) => Piece::new(kind, moved_piece.color, mv.to),
            None => moved_piece,
        };
        arriving.relocate(mv.to);
        arriving.has_moved = true;
        self.board.put(arriving);

        let prev_en_passant = self.board.en_passant;
        self.board.en_passant = is_double_step(&moved_piece, &mv).then_some(mv.to);
        if self.board.en_passant != prev_en_passant {
            trace!(from = ?prev_en_passant, to = ?self.board.en_passant, "en passant updated");
        }

        self.side_to_move = self.side_to_move.opposite();
        self.ply += 1;

        self.undo_stack.push(UndoState {
            mv,
            moved_piece,
            captured_piece,
            castling_rook: castling_record,
            prev_en_passant,
            prev_status: mem::take(&mut self.cache),
        });

        if recompute_status {
            self.update_board_status()?;
        }
        Ok(())
    }
}
