//! Crate root module declarations for the mailbox chess rules engine.
//!
//! This file exposes the position model, the per-piece ruleset, move
//! application and status evaluation, search, engines and utility helpers so
//! binaries, tests, and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_move;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
    pub mod position;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_rules;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod speculative_move;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod tables {
    pub mod canned_moves;
}

pub mod engines {
    pub mod background_search;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
