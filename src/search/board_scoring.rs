//! Pluggable board evaluation interfaces and the baseline material scorer.
//!
//! Search delegates static position scoring to `BoardScorer`, so alternate
//! heuristics can be swapped without altering search code.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_rules::is_in_check;

/// Score for delivering checkmate; the mated side sees its negation.
pub const CHECKMATE_SCORE: i32 = 100;
/// Penalty for the perspective side's king being in check.
pub const CHECK_PENALTY: i32 = 10;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `perspective`, whoever is to move.
    fn score(&self, position: &Position, perspective: Color) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 20,
            PieceKind::King => 100,
        }
    }

    #[inline]
    fn material_balance(position: &Position, perspective: Color) -> i32 {
        position
            .board()
            .all_pieces()
            .map(|piece| {
                let value = Self::piece_value(piece.kind);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    /// Checkmate scores ±100 outright when the position's status is current.
    /// Otherwise signed material, less the check penalty when the
    /// perspective king is attacked.
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        if position.cached_status(perspective) == Some(BoardStatus::Checkmate) {
            return -CHECKMATE_SCORE;
        }
        if position.cached_status(perspective.opposite()) == Some(BoardStatus::Checkmate) {
            return CHECKMATE_SCORE;
        }

        let mut score = Self::material_balance(position, perspective);
        if is_in_check(position.board(), perspective) {
            score -= CHECK_PENALTY;
        }
        score
    }
}
