//! Crate root module declarations for the chess board rules engine.
//!
//! Exposes the board model, move types and notation, the legal-move
//! validator and the `ChessGame` facade so hosts, benches and tests can
//! import stable module paths.

pub mod chess_errors;
pub mod chess_game;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
    pub mod tile;
}

pub mod moves {
    pub mod chess_move;
    pub mod move_events;
    pub mod move_notation;
}

pub mod move_generation {
    pub mod invalid_reasons;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod movement_validator;
    pub mod perft;
}

pub mod utils {
    pub mod render_board;
    pub mod util;
}
