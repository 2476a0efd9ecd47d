//! Value types shared by the board, the trackers, and the FEN codec.

use std::fmt;
use std::str::FromStr;

use crate::errors::Errors;
use crate::game_state::chess_rules::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use crate::game_state::coord::Coord;
use crate::utils::algebraic::split_leading_square;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step of this color's pawns.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

/// Piece kind (color is carried separately by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Directions along which this kind attacks at any distance.
    /// Jumping pieces and the king have none.
    #[inline]
    pub fn slide_directions(self) -> &'static [Coord] {
        match self {
            PieceKind::Rook => &ROOK_DIRECTIONS,
            PieceKind::Bishop => &BISHOP_DIRECTIONS,
            PieceKind::Queen => &QUEEN_DIRECTIONS,
            _ => &[],
        }
    }

    /// True when a piece of this kind standing at the far end of a ray cast
    /// along `direction` would attack back down that ray.
    #[inline]
    pub fn slides_along(self, direction: Coord) -> bool {
        self.slide_directions().contains(&-direction)
    }

    /// Lowercase FEN letter.
    #[inline]
    pub const fn fen_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::fen_letter`].
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kinds a pawn may turn into.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// A piece standing on the board. Plain value: copying it never aliases
/// board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub coord: Coord,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, coord: Coord) -> Self {
        Self { kind, color, coord }
    }

    /// Builds a piece from its FEN letter; case selects the color.
    pub fn from_fen_char(ch: char, coord: Coord) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(kind, color, coord))
    }

    #[inline]
    pub fn fen_char(&self) -> char {
        let letter = self.kind.fen_letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    #[inline]
    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// A from/to pair submitted by the caller, optionally naming the piece a
/// promoting pawn becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Displacement from the source square to the destination.
    #[inline]
    pub fn moved_by(&self) -> Coord {
        self.to - self.from
    }
}

/// Coordinate notation: "e2e4", "e7e8n", "a9a10".
impl FromStr for ChessMove {
    type Err = Errors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, rest) = split_leading_square(s)?;
        let (to, rest) = split_leading_square(rest)?;

        let mut tail = rest.chars();
        let promotion = match (tail.next(), tail.next()) {
            (None, _) => None,
            (Some(c), None) => Some(
                PieceKind::from_letter(c)
                    .ok_or_else(|| Errors::InvalidAlgebraic(format!("unknown promotion piece in: {s}")))?,
            ),
            _ => {
                return Err(Errors::InvalidAlgebraic(format!(
                    "trailing characters in move: {s}"
                )))
            }
        };

        Ok(ChessMove { from, to, promotion })
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_letter())?;
        }
        Ok(())
    }
}
