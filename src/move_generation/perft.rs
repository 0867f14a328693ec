//! Perft node counting over the apply/undo mechanism.
//!
//! Counts leaf nodes of the legal move tree, with per-category tallies for
//! the moves that reach each leaf. Reference counts for well-known positions
//! make this the main correctness oracle for the rules.

use std::thread;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::MoveOptions;
use crate::moves::move_rules::is_in_check;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Single-threaded perft. The position is restored before returning.
pub fn perft(position: &mut Position, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(position, depth, &mut counts)?;
    Ok(counts)
}

/// Perft with one worker thread per root move, each on its own snapshot.
pub fn perft_parallel(position: &Position, depth: u8) -> ChessResult<PerftCounts> {
    if depth <= 1 {
        return perft(&mut position.snapshot(), depth);
    }

    let mut root = position.snapshot();
    let root_moves = root.generate_legal_moves()?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut branch = root.snapshot();
        handles.push(thread::spawn(move || -> ChessResult<PerftCounts> {
            if !branch.make_move_with(&mv, MoveOptions::SPECULATIVE)? {
                return Err(ChessErrors::LegalMoveRejected(mv));
            }
            let mut local = PerftCounts::default();
            perft_recurse(&mut branch, depth - 1, &mut local)?;
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| ChessErrors::WorkerPanicked)??;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse(position: &mut Position, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let moves = position.generate_legal_moves()?;

    for mv in moves {
        let mut child = position
            .speculate(&mv, MoveOptions::SPECULATIVE)?
            .ok_or(ChessErrors::LegalMoveRejected(mv))?;

        if depth > 1 {
            perft_recurse(&mut child, depth - 1, counts)?;
        } else {
            counts.nodes += 1;
            if child.last_capture().is_some() {
                counts.captures += 1;
            }
            let applied = *child.applied();
            if applied.is_en_passant {
                counts.en_passant += 1;
            }
            if applied.is_castling {
                counts.castles += 1;
            }
            if applied.promotion.is_some() {
                counts.promotions += 1;
            }
            if is_in_check(child.board(), child.turn()) {
                counts.checks += 1;
                if child.generate_legal_moves()?.is_empty() {
                    counts.checkmates += 1;
                }
            }
        }

        child.release()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";

    fn nodes(fen: &str, depth: u8) -> usize {
        let mut position = Position::from_fen(fen).expect("perft FEN should parse");
        let before = position.to_string();
        let counts = perft(&mut position, depth).expect("perft should run");
        assert_eq!(position.to_string(), before);
        counts.nodes
    }

    #[test]
    fn start_position_reference_counts() {
        let mut position = Position::new_game();
        assert_eq!(perft(&mut position, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&mut position, 2).expect("perft").nodes, 400);
        let depth_three = perft(&mut position, 3).expect("perft");
        assert_eq!(depth_three.nodes, 8902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(depth_three.checkmates, 0);
    }

    #[test]
    fn kiwipete_reference_counts() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        let mut position = Position::from_fen(KIWIPETE).expect("FEN");
        let depth_two = perft(&mut position, 2).expect("perft");
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn endgame_position_reference_counts() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(nodes(fen, 1), 14);
        assert_eq!(nodes(fen, 2), 191);
        assert_eq!(nodes(fen, 3), 2812);
    }

    #[test]
    fn promotion_position_reference_counts() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
        assert_eq!(nodes(fen, 1), 6);
        assert_eq!(nodes(fen, 2), 264);
    }

    #[test]
    fn parallel_perft_matches_single_threaded() {
        let position = Position::from_fen(KIWIPETE).expect("FEN");
        let parallel = perft_parallel(&position, 2).expect("parallel perft");
        let mut serial_position = position.clone();
        let serial = perft(&mut serial_position, 2).expect("perft");
        assert_eq!(parallel, serial);
    }
}
