//! Status evaluation by exhaustive legal-move enumeration.
//!
//! For the side to move, every own piece is tried against every square of
//! the grid. Candidates that pass geometry are tested for self-check by
//! applying and undoing them. Promotions expand into one move per target
//! kind.

use tracing::trace;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::game_state::position::{Position, StatusCache};
use crate::moves::move_rules::{check_move, is_in_check};
use crate::moves::pawn_moves::is_promotion_move;

impl Position {
    /// Recompute the legal-move list and status for the side to move. The
    /// other color is reset to `NotInCheck` with an empty list.
    pub fn update_board_status(&mut self) -> ChessResult<()> {
        let mover = self.side_to_move;

        // Provisionally mated while in check; any legal move downgrades it.
        let in_check = is_in_check(&self.board, mover);
        let mut status = if in_check {
            BoardStatus::Checkmate
        } else {
            BoardStatus::NotInCheck
        };

        let legal_moves = self.generate_legal_moves()?;
        if in_check && !legal_moves.is_empty() {
            status = BoardStatus::Check;
        } else if !in_check && legal_moves.is_empty() {
            status = BoardStatus::Stalemate;
        }
        trace!(?mover, ?status, moves = legal_moves.len(), "board status updated");

        let mut cache = StatusCache {
            computed_for: Some(mover),
            ..StatusCache::default()
        };
        cache.status[mover.index()] = status;
        cache.legal_moves[mover.index()] = legal_moves;
        self.cache = cache;
        Ok(())
    }

    /// Recompute status only when the cache does not belong to the side to move.
    pub fn ensure_board_status(&mut self) -> ChessResult<()> {
        if !self.status_is_current() {
            self.update_board_status()?;
        }
        Ok(())
    }

    /// Legal moves for the side to move, in (from_row, from_column, to_row,
    /// to_column) order with promotions listed bishop, rook, queen, knight.
    /// Leaves the status cache untouched.
    pub fn generate_legal_moves(&mut self) -> ChessResult<Vec<Move>> {
        let sources: Vec<Piece> = self.board.pieces(self.side_to_move).copied().collect();
        let mut legal = Vec::with_capacity(48);

        for piece in sources {
            for to in Square::all() {
                let candidate = Move::new(piece.square(), to);
                if !check_move(&self.board, &candidate) {
                    continue;
                }
                if is_promotion_move(&piece, &candidate) {
                    for kind in PieceKind::PROMOTIONS {
                        let promotion = Move::with_promotion(candidate.from, to, kind);
                        if let Ok(prepared) = self.prepare_move(&promotion, true)? {
                            legal.push(prepared);
                        }
                    }
                } else if let Ok(prepared) = self.prepare_move(&candidate, true)? {
                    legal.push(prepared);
                }
            }
        }

        Ok(legal)
    }
}
