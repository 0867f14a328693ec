//! Fixed-depth greedy-line minimax.
//!
//! Every root candidate is scored by following a single line: after each
//! applied move, the side to move picks the reply that is best for it by
//! static score, and only that reply is explored one ply deeper. A
//! checkmate anywhere on the line ends it with an extremal score. Each
//! application is held by a speculation guard, so the position is restored
//! exactly as the line unwinds.
//!
//! Root ties are broken uniformly at random.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::MoveOptions;
use crate::search::board_scoring::{BoardScorer, CHECKMATE_SCORE};

pub const DEFAULT_MINIMAX_DEPTH: u8 = 3;

/// Line moves come from legal-move lists, so they skip the king-safety
/// check, but need status for mate detection and the next reply list.
const LINE_MOVE: MoveOptions = MoveOptions {
    check_king_safety: false,
    recompute_status: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxConfig {
    /// Plies searched below each root candidate.
    pub depth: u8,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_MINIMAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Every root candidate with its line score, in legal-move order.
    pub candidates: Vec<(Move, i32)>,
    /// Number of candidates sharing the best score.
    pub tied: usize,
    /// Moves applied during the search.
    pub nodes: u64,
}

/// Search with the thread-local RNG for tie-breaking.
pub fn minimax_search<S: BoardScorer>(
    position: &mut Position,
    scorer: &S,
    config: MinimaxConfig,
) -> ChessResult<SearchResult> {
    minimax_search_with_rng(position, scorer, config, &mut rand::rng())
}

/// Select a move for the side to move. Fails with `NoLegalMoves` when there
/// is nothing to play; callers check for checkmate or stalemate first.
pub fn minimax_search_with_rng<S: BoardScorer, R: Rng + ?Sized>(
    position: &mut Position,
    scorer: &S,
    config: MinimaxConfig,
    rng: &mut R,
) -> ChessResult<SearchResult> {
    let root = position.turn();
    let candidates = position.legal_moves()?.to_vec();
    if candidates.is_empty() {
        return Err(ChessErrors::NoLegalMoves(root));
    }

    let mut line = LineSearch {
        scorer,
        root,
        nodes: 0,
    };
    let mut scored = Vec::with_capacity(candidates.len());
    let mut best_score = i32::MIN;
    let mut best_moves = Vec::new();

    for mv in candidates {
        let score = line.score_line(position, &mv, config.depth)?;
        debug!(%mv, score, "candidate scored");

        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(mv);
        } else if score == best_score {
            best_moves.push(mv);
        }
        scored.push((mv, score));
    }

    let picked = *best_moves
        .as_slice()
        .choose(rng)
        .ok_or(ChessErrors::NoLegalMoves(root))?;

    Ok(SearchResult {
        best_move: Some(picked),
        best_score,
        candidates: scored,
        tied: best_moves.len(),
        nodes: line.nodes,
    })
}

struct LineSearch<'a, S: BoardScorer> {
    scorer: &'a S,
    root: Color,
    nodes: u64,
}

impl<S: BoardScorer> LineSearch<'_, S> {
    /// Apply `mv`, score the line below it, and undo.
    fn score_line(&mut self, position: &mut Position, mv: &Move, depth: u8) -> ChessResult<i32> {
        let mut line = position
            .speculate(mv, LINE_MOVE)?
            .ok_or(ChessErrors::LegalMoveRejected(*mv))?;
        self.nodes += 1;
        let score = self.score_after(&mut line, depth)?;
        line.release()?;
        Ok(score)
    }

    fn score_after(&mut self, position: &mut Position, depth: u8) -> ChessResult<i32> {
        if let Some(score) = self.mate_score(position) {
            return Ok(score);
        }
        if depth == 0 {
            return Ok(self.scorer.score(position, self.root));
        }

        let mover = position.turn();
        let responses = position.legal_moves()?.to_vec();
        if responses.is_empty() {
            // Not mated, so stalemate.
            return Ok(0);
        }

        let mut best: Option<(Move, i32)> = None;
        for response in responses {
            let trial = position
                .speculate(&response, LINE_MOVE)?
                .ok_or(ChessErrors::LegalMoveRejected(response))?;
            self.nodes += 1;
            let raw = self.scorer.score(&trial, self.root);
            trial.release()?;

            let score = if mover == self.root { raw } else { -raw };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((response, score)),
            }
        }

        let (reply, _) = best.ok_or(ChessErrors::NoLegalMoves(mover))?;
        self.score_line(position, &reply, depth - 1)
    }

    /// ±100 when either color is checkmated in the current position.
    fn mate_score(&self, position: &Position) -> Option<i32> {
        Color::ALL.into_iter().find_map(|color| {
            (position.cached_status(color) == Some(BoardStatus::Checkmate)).then_some(
                if color == self.root {
                    -CHECKMATE_SCORE
                } else {
                    CHECKMATE_SCORE
                },
            )
        })
    }
}
