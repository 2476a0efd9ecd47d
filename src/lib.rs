//! Crate root module declarations for the fenboard position engine.
//!
//! The crate models a chess position on a board of any rectangular size up
//! to 26 files: FEN parsing and generation, move application with castling,
//! en passant and promotion, and per-color check and pin tracking. Move
//! legality is left to the caller.

pub mod errors;

pub mod game_state {
    pub mod castling_tracker;
    pub mod check_tracker;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod chessboard;
    pub mod coord;
    pub mod line_of_sight;
    pub mod piece_moves;
    pub mod placement;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
