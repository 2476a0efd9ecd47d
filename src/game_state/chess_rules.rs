//! Canonical chess-rule constants.
//!
//! Static rule literals shared by setup, ray casting, and notation: the
//! standard starting position, direction tables, and jump offsets.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::coord::Coord;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Piece a pawn becomes when the move does not name one.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// Files are named `a..z`, so boards are at most this wide.
pub const MAX_FILES: i32 = 26;

pub const ROOK_DIRECTIONS: [Coord; 4] = [
    Coord { x: 1, y: 0 },
    Coord { x: -1, y: 0 },
    Coord { x: 0, y: 1 },
    Coord { x: 0, y: -1 },
];

pub const BISHOP_DIRECTIONS: [Coord; 4] = [
    Coord { x: 1, y: 1 },
    Coord { x: 1, y: -1 },
    Coord { x: -1, y: 1 },
    Coord { x: -1, y: -1 },
];

pub const QUEEN_DIRECTIONS: [Coord; 8] = [
    Coord { x: 1, y: 0 },
    Coord { x: -1, y: 0 },
    Coord { x: 0, y: 1 },
    Coord { x: 0, y: -1 },
    Coord { x: 1, y: 1 },
    Coord { x: 1, y: -1 },
    Coord { x: -1, y: 1 },
    Coord { x: -1, y: -1 },
];

pub const KNIGHT_OFFSETS: [Coord; 8] = [
    Coord { x: -2, y: -1 },
    Coord { x: -2, y: 1 },
    Coord { x: -1, y: -2 },
    Coord { x: -1, y: 2 },
    Coord { x: 1, y: -2 },
    Coord { x: 1, y: 2 },
    Coord { x: 2, y: -1 },
    Coord { x: 2, y: 1 },
];

/// The 8 king steps around the origin.
pub const KING_STEPS: [Coord; 8] = QUEEN_DIRECTIONS;
