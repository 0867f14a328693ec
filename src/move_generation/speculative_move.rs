//! Scoped speculative application.
//!
//! `Position::speculate` applies a move and hands back a guard that derefs to
//! the position. The move is undone when the guard is released or dropped,
//! so every speculative application is paired with exactly one undo. Guards
//! nest: a guard borrowed mutably can speculate again, and the inner guard
//! must go out of scope before the outer one.

use std::ops::{Deref, DerefMut};

use tracing::{error, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::MoveOptions;

pub struct SpeculativeMove<'a> {
    position: &'a mut Position,
    applied: Move,
    released: bool,
}

impl Position {
    /// Apply `mv` under a guard. `Ok(None)` means the move was rejected and
    /// nothing was applied.
    pub fn speculate(
        &mut self,
        mv: &Move,
        options: MoveOptions,
    ) -> ChessResult<Option<SpeculativeMove<'_>>> {
        if !self.make_move_with(mv, options)? {
            return Ok(None);
        }
        let applied = self.last_move().copied().unwrap_or(*mv);
        trace!(%applied, depth = self.undo_depth(), "speculating");
        Ok(Some(SpeculativeMove {
            position: self,
            applied,
            released: false,
        }))
    }
}

impl SpeculativeMove<'_> {
    /// The move as applied, with its application flags.
    #[inline]
    pub fn applied(&self) -> &Move {
        &self.applied
    }

    /// Undo the move now, surfacing any invariant violation.
    pub fn release(mut self) -> ChessResult<Move> {
        self.released = true;
        self.position.undo_with(false)
    }
}

impl Deref for SpeculativeMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for SpeculativeMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for SpeculativeMove<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.position.undo_with(false) {
            error!(applied = %self.applied, %err, "failed to undo speculative move");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    #[test]
    fn guard_undoes_on_drop_and_release() {
        let mut position = Position::new_game();
        let before = position.to_string();
        {
            let guard = position
                .speculate(&Move::from_coords(6, 4, 4, 4), MoveOptions::SPECULATIVE)
                .expect("speculation")
                .expect("legal move");
            assert_eq!(guard.turn(), Color::Black);
        }
        assert_eq!(position.to_string(), before);

        let guard = position
            .speculate(&Move::from_coords(7, 6, 5, 5), MoveOptions::REAL)
            .expect("speculation")
            .expect("legal move");
        assert_eq!(guard.release().expect("release"), Move::from_coords(7, 6, 5, 5));
        assert_eq!(position.to_string(), before);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut position = Position::new_game();
        position.ensure_board_status().expect("status");
        let before = position.to_string();
        {
            let mut outer = position
                .speculate(&Move::from_coords(6, 3, 4, 3), MoveOptions::REAL)
                .expect("speculation")
                .expect("legal move");
            {
                let inner = outer
                    .speculate(&Move::from_coords(1, 3, 3, 3), MoveOptions::REAL)
                    .expect("speculation")
                    .expect("legal move");
                assert_eq!(inner.undo_depth(), 2);
            }
            assert_eq!(outer.undo_depth(), 1);
            assert_eq!(outer.turn(), Color::Black);
        }
        assert_eq!(position.to_string(), before);
        assert!(position.status_is_current());
        assert_eq!(position.legal_moves().expect("status").len(), 20);
    }

    #[test]
    fn rejected_speculation_returns_none() {
        let mut position = Position::new_game();
        let guard = position
            .speculate(&Move::from_coords(7, 0, 4, 0), MoveOptions::REAL)
            .expect("speculation");
        assert!(guard.is_none());
    }
}
