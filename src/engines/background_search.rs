//! Run an engine on its own thread.
//!
//! The worker owns a snapshot of the position and the engine for the
//! duration of the search and hands both back on `join`, so the caller's
//! position is never shared across threads.

use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::position::Position;

type WorkerReturn = (Position, Box<dyn Engine>, ChessResult<EngineOutput>);

pub struct BackgroundSearch {
    handle: JoinHandle<WorkerReturn>,
}

impl BackgroundSearch {
    /// Start `engine` on a snapshot of `position`.
    pub fn spawn(position: &Position, mut engine: Box<dyn Engine>, params: GoParams) -> Self {
        let mut snapshot = position.snapshot();
        let handle = thread::spawn(move || {
            debug!(engine = engine.name(), "background search started");
            let output = engine.choose_move(&mut snapshot, &params);
            (snapshot, engine, output)
        });
        Self { handle }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker. Returns the snapshot, the engine and its output.
    pub fn join(self) -> ChessResult<WorkerReturn> {
        self.handle.join().map_err(|_| ChessErrors::WorkerPanicked)
    }
}
