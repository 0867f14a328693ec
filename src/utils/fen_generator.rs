//! FEN output for a position.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

/// FEN snapshot of a position. The halfmove clock is not tracked and is
/// always written as 0.
pub fn generate_fen(position: &Position) -> String {
    let board = generate_board_field(position);
    let side_to_move = match position.turn() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(position);
    let en_passant = generate_en_passant_field(position);

    format!(
        "{} {} {} {} 0 {}",
        board,
        side_to_move,
        castling,
        en_passant,
        position.ply() / 2 + 1
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for row in 0..BOARD_SIZE {
        let mut empty_count = 0u8;

        for column in 0..BOARD_SIZE {
            if let Some(piece) = position.piece_at(Square::new(row, column)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row + 1 < BOARD_SIZE {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(position: &Position) -> String {
    let unmoved = |kind: PieceKind, color: Color, row: u8, column: u8| {
        matches!(
            position.piece_at(Square::new(row, column)),
            Some(piece) if piece.kind == kind && piece.color == color && !piece.has_moved
        )
    };

    let mut out = String::new();
    for (color, column, letter) in [
        (Color::White, 7, 'K'),
        (Color::White, 0, 'Q'),
        (Color::Black, 7, 'k'),
        (Color::Black, 0, 'q'),
    ] {
        let rank = color.back_rank();
        if unmoved(PieceKind::King, color, rank, 4) && unmoved(PieceKind::Rook, color, rank, column) {
            out.push(letter);
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

fn generate_en_passant_field(position: &Position) -> String {
    position
        .en_passant_pawn()
        .and_then(|pawn| pawn.offset(position.turn().forward(), 0))
        .and_then(|target| square_to_algebraic(target).ok())
        .unwrap_or_else(|| "-".to_owned())
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Move;
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(generate_fen(&parsed), STARTING_POSITION_FEN);
        assert_eq!(generate_fen(&Position::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_reference_positions() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 0 6",
        ] {
            let parsed = parse_fen(fen).expect("reference FEN should parse");
            assert_eq!(generate_fen(&parsed), fen);
        }
    }

    #[test]
    fn double_step_produces_an_en_passant_target() {
        let mut position = Position::new_game();
        assert!(position
            .make_move(&Move::from_coords(6, 4, 4, 4))
            .expect("e2e4 should apply"));
        assert_eq!(
            generate_fen(&position),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
