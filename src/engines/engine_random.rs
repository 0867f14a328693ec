//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and as a match opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::position::Position;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(
        &mut self,
        position: &mut Position,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let legal_moves = position.legal_moves()?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        out.best_move = match params.seed {
            Some(seed) => legal_moves.choose(&mut StdRng::seed_from_u64(seed)).copied(),
            None => legal_moves.choose(&mut rand::rng()).copied(),
        };
        Ok(out)
    }
}
