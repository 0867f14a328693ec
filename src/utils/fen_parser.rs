//! FEN-to-Position parser.
//!
//! Castling rights are expressed through has-moved flags: a king or corner
//! rook keeps `has_moved == false` only when a right that needs it is
//! present. The en passant target becomes the vulnerable pawn behind it.
//! The halfmove clock is validated but not tracked.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

/// Castling rights as (color, rook column) pairs.
type CastlingRights = Vec<(Color, u8)>;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let side_to_move = parse_side_to_move(side_part)?;
    let rights = parse_castling_rights(castling_part)?;
    halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock {halfmove_part}")))?;
    let fullmove = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid(&format!("fullmove number {fullmove_part}")))?;

    let mut position = Position::new_empty();
    for piece in parse_board(board_part, &rights)? {
        position.place(piece)?;
    }
    for color in Color::ALL {
        if position.king_square(color).is_none() {
            return Err(ChessErrors::MissingKing(color));
        }
    }

    position.set_side_to_move(side_to_move);
    let vulnerable = parse_en_passant_square(en_passant_part, side_to_move)?;
    if let Some(square) = vulnerable {
        match position.piece_at(square) {
            Some(pawn) if pawn.kind == PieceKind::Pawn && pawn.color != side_to_move => {}
            _ => return Err(invalid(&format!("no pawn to capture via {en_passant_part}"))),
        }
    }
    position.set_en_passant_pawn(vulnerable)?;
    let black_to_move = u32::from(side_to_move == Color::Black);
    position.set_ply(fullmove.saturating_sub(1) * 2 + black_to_move);

    Ok(position)
}

#[inline]
fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str, rights: &CastlingRights) -> ChessResult<Vec<Piece>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut column = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                column += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            if column >= 8 {
                return Err(invalid("rank has too many files"));
            }

            let mut piece = Piece::new(kind, color, Square::new(row as u8, column as u8));
            piece.has_moved = infer_has_moved(&piece, rights);
            pieces.push(piece);
            column += 1;
        }

        if column != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(pieces)
}

fn infer_has_moved(piece: &Piece, rights: &CastlingRights) -> bool {
    let home_rank = piece.color.back_rank();
    match piece.kind {
        PieceKind::Pawn => piece.row != piece.color.pawn_start_row(),
        PieceKind::King => {
            piece.square() != Square::new(home_rank, 4)
                || !rights.iter().any(|(color, _)| *color == piece.color)
        }
        PieceKind::Rook => {
            piece.row != home_rank || !rights.contains(&(piece.color, piece.column))
        }
        _ => false,
    }
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side to move {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(Vec::new());
    }

    castling_part
        .chars()
        .map(|ch| match ch {
            'K' => Ok((Color::White, 7)),
            'Q' => Ok((Color::White, 0)),
            'k' => Ok((Color::Black, 7)),
            'q' => Ok((Color::Black, 0)),
            _ => Err(invalid(&format!("castling rights character {ch}"))),
        })
        .collect()
}

/// The FEN target is the square the pawn skipped; the vulnerable pawn sits
/// one step further from the side to move.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)?;
    target
        .offset(-side_to_move.forward(), 0)
        .map(Some)
        .ok_or_else(|| invalid(&format!("en passant square {en_passant_part}")))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };
    PieceKind::from_letter(ch).map(|kind| (color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;

    #[test]
    fn starting_fen_matches_the_standard_setup() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed.to_string(), Position::new_game().to_string());
        assert_eq!(parsed.turn(), Color::White);
        assert_eq!(parsed.ply(), 0);
    }

    #[test]
    fn castling_rights_map_onto_has_moved_flags() {
        let parsed = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("FEN");
        let moved = |row, column| {
            parsed
                .piece_at(Square::new(row, column))
                .expect("piece")
                .has_moved
        };
        assert!(!moved(7, 4));
        assert!(!moved(7, 7));
        assert!(moved(7, 0));
        assert!(!moved(0, 4));
        assert!(!moved(0, 0));
        assert!(moved(0, 7));
    }

    #[test]
    fn en_passant_target_flags_the_pawn_behind_it() {
        let parsed =
            parse_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").expect("FEN");
        assert_eq!(parsed.en_passant_pawn(), Some(Square::new(3, 3)));
        assert_eq!(parsed.ply(), 4);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(ChessErrors::MissingKing(Color::White))
        ));
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1").is_err());
    }
}
