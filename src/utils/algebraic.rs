//! Square and move conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`, `e2e4`, `a7a8q`)
//! and grid coordinates. Rank 8 is row 0 and file a is column 0.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::{PieceKind, Square};

/// Convert long algebraic notation (for example: "e4") to a grid square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraicChar(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicChar(rank as char));
    }

    Ok(Square::new(b'8' - rank, file - b'a'))
}

/// Convert a grid square to long algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if !square.in_bounds() {
        return Err(ChessErrors::OffBoard {
            row: square.row as i16,
            column: square.column as i16,
        });
    }

    let file_char = char::from(b'a' + square.column);
    let rank_char = char::from(b'8' - square.row);
    Ok(format!("{file_char}{rank_char}"))
}

/// Render a move as "e2e4", with a lowercase promotion suffix ("a7a8q").
pub fn move_to_long_algebraic(mv: &Move) -> String {
    let from = square_to_algebraic(mv.from)
        .unwrap_or_else(|_| format!("({},{})", mv.from.row, mv.from.column));
    let to =
        square_to_algebraic(mv.to).unwrap_or_else(|_| format!("({},{})", mv.to.row, mv.to.column));
    match mv.promotion {
        Some(kind) => format!("{from}{to}{}", kind.letter()),
        None => format!("{from}{to}"),
    }
}

/// Parse "e2e4" or "e7e8q" into a move with no application flags set.
pub fn parse_long_algebraic_move(text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    match text[4..].chars().next() {
        None => Ok(Move::new(from, to)),
        Some(letter) => match PieceKind::from_letter(letter) {
            Some(kind) if kind.is_promotion_target() => Ok(Move::with_promotion(from, to, kind)),
            _ => Err(ChessErrors::InvalidAlgebraicChar(letter)),
        },
    }
}
