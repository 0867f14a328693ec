//! Automated player built on the greedy-line minimax search.
//!
//! The engine starts in a configurable `MoveType`. In `Opening` or `Defence`
//! mode it plays the canned move for its color once, provided that move is
//! legal in the current position, and then switches to `Standard` search for
//! the rest of the game.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::position::Position;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::minimax::{minimax_search, minimax_search_with_rng, MinimaxConfig};
use crate::tables::canned_moves::{canned_move, MoveType};

pub struct MinimaxEngine<S: BoardScorer = MaterialScorer> {
    scorer: S,
    config: MinimaxConfig,
    initial_move_type: MoveType,
    move_type: MoveType,
}

impl MinimaxEngine<MaterialScorer> {
    pub fn new(config: MinimaxConfig) -> Self {
        Self::with_scorer(MaterialScorer, config)
    }
}

impl Default for MinimaxEngine<MaterialScorer> {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S, config: MinimaxConfig) -> Self {
        Self {
            scorer,
            config,
            initial_move_type: MoveType::Standard,
            move_type: MoveType::Standard,
        }
    }

    /// Start (and restart on `new_game`) in `move_type`.
    pub fn with_move_type(mut self, move_type: MoveType) -> Self {
        self.initial_move_type = move_type;
        self.move_type = move_type;
        self
    }

    #[inline]
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.move_type = self.initial_move_type;
    }

    fn choose_move(
        &mut self,
        position: &mut Position,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let mut out = EngineOutput::default();
        let mover = position.turn();

        let move_type = std::mem::replace(&mut self.move_type, MoveType::Standard);
        if let Some(canned) = canned_move(move_type, mover) {
            if position.is_legal(&canned)? {
                out.info_lines.push(format!(
                    "info string minimax_engine {move_type:?} move {canned}"
                ));
                out.best_move = Some(canned);
                return Ok(out);
            }
            warn!(?move_type, %canned, "canned move not legal here, searching instead");
        }

        let config = MinimaxConfig {
            depth: params.depth.unwrap_or(self.config.depth),
        };
        let result = match params.seed {
            Some(seed) => minimax_search_with_rng(
                position,
                &self.scorer,
                config,
                &mut StdRng::seed_from_u64(seed),
            )?,
            None => minimax_search(position, &self.scorer, config)?,
        };

        out.info_lines.push(format!(
            "info string minimax_engine depth {} candidates {} nodes {}",
            config.depth,
            result.candidates.len(),
            result.nodes
        ));
        out.info_lines.push(format!(
            "info string minimax_engine score {} tied {}",
            result.best_score, result.tied
        ));
        out.best_move = result.best_move;
        Ok(out)
    }
}
