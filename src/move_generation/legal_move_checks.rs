//! Move validation on a `Position`.
//!
//! `prepare_move` turns a raw move into the exact move the applier will
//! perform (castling alias resolved, application flags filled in) or
//! reports why it is rejected. Rejection is an ordinary outcome and never an
//! error.

use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::king_moves::{castling_rook, normalize_castling_alias};
use crate::moves::move_rules::{check_move, is_in_check};
use crate::moves::pawn_moves::{en_passant_victim, is_promotion_move};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptySource,
    WrongSideToMove,
    IllegalGeometry,
    MissingPromotion,
    UnexpectedPromotion,
    LeavesKingInCheck,
}

impl Position {
    /// Piece at the source, correct side to move, geometry passes, and
    /// unless `check_king_safety` is false the mover's king ends up safe.
    pub fn is_valid(&mut self, mv: &Move, check_king_safety: bool) -> ChessResult<bool> {
        Ok(self.prepare_move(mv, check_king_safety)?.is_ok())
    }

    /// Apply `mv` without status recomputation, test the mover's king, undo.
    /// A promotion move without a kind is tried as a queen promotion. Moves
    /// that cannot be applied at all report `false`.
    pub fn would_put_king_in_check(&mut self, mv: &Move) -> ChessResult<bool> {
        let mut trial = *mv;
        if trial.promotion.is_none() {
            if let Some(piece) = self.board.piece_at(trial.from) {
                if is_promotion_move(piece, &trial) {
                    trial.promotion = Some(PieceKind::Queen);
                }
            }
        }
        match self.prepare_move(&trial, false)? {
            Ok(prepared) => self.test_self_check(prepared),
            Err(_) => Ok(false),
        }
    }

    pub(crate) fn test_self_check(&mut self, prepared: Move) -> ChessResult<bool> {
        let mover = self.side_to_move;
        self.apply_prepared(prepared, false)?;
        let in_check = is_in_check(&self.board, mover);
        self.undo_with(false)?;
        Ok(in_check)
    }

    /// Resolve `mv` into the move that would be applied, or the reason it
    /// is rejected. The outer `Result` carries invariant violations found
    /// while probing king safety.
    pub(crate) fn prepare_move(
        &mut self,
        mv: &Move,
        check_king_safety: bool,
    ) -> ChessResult<Result<Move, Rejection>> {
        let mut prepared = normalize_castling_alias(&self.board, &mv.plain());

        let Some(piece) = self.board.piece_at(prepared.from).copied() else {
            return Ok(reject(mv, Rejection::EmptySource));
        };
        if piece.color != self.side_to_move {
            return Ok(reject(mv, Rejection::WrongSideToMove));
        }
        if !check_move(&self.board, &prepared) {
            return Ok(reject(mv, Rejection::IllegalGeometry));
        }

        if is_promotion_move(&piece, &prepared) {
            match prepared.promotion {
                Some(kind) if kind.is_promotion_target() => {}
                _ => return Ok(reject(mv, Rejection::MissingPromotion)),
            }
        } else if prepared.promotion.is_some() {
            return Ok(reject(mv, Rejection::UnexpectedPromotion));
        }

        prepared.first_move = !piece.has_moved;
        prepared.is_castling = piece.kind == PieceKind::King
            && prepared.d_column().abs() == 2
            && castling_rook(piece.color, &prepared).is_some();
        prepared.is_en_passant = en_passant_victim(&self.board, &piece, &prepared).is_some();

        if check_king_safety && self.test_self_check(prepared)? {
            return Ok(reject(mv, Rejection::LeavesKingInCheck));
        }
        Ok(Ok(prepared))
    }
}

#[inline]
fn reject(mv: &Move, reason: Rejection) -> Result<Move, Rejection> {
    debug!(%mv, ?reason, "move rejected");
    Err(reason)
}
