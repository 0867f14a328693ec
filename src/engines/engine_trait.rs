//! Engine abstraction layer used by drivers and the match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::position::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Overrides the engine's configured search depth for one call.
    pub depth: Option<u8>,
    /// Seeds the engine's tie-break RNG for one call.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose a move for the side to move. The position must be left exactly
    /// as it was passed in.
    fn choose_move(&mut self, position: &mut Position, params: &GoParams)
        -> ChessResult<EngineOutput>;
}
