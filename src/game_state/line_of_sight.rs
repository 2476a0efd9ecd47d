//! Rays cast outward from a square, classified as check, pin, or clear.
//!
//! A ray starts next to its origin and walks one direction, passing over
//! pieces of the defending color until it meets the first enemy piece or
//! leaves the board. Jump attacks (knight, pawn) are single-square lines
//! that can only ever be checks.

use crate::game_state::chess_types::Color;
use crate::game_state::coord::Coord;
use crate::game_state::placement::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SightKind {
    /// An enemy attacker reaches the origin with nothing in between.
    Check,
    /// Exactly one defending piece stands between the origin and an enemy
    /// slider that attacks along the ray.
    Pin,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOfSight {
    direction: Coord,
    /// Every square walked, up to and including the stopping square.
    squares: Vec<Coord>,
    kind: SightKind,
    attacker: Option<Coord>,
    pinned: Option<Coord>,
}

impl LineOfSight {
    /// Casts a sliding ray from `origin` along `direction` on behalf of
    /// `defender`.
    pub fn cast(placement: &Placement, origin: Coord, direction: Coord, defender: Color) -> Self {
        let mut squares = Vec::new();
        let mut allied: Option<Coord> = None;
        let mut cur = origin + direction;

        while placement.in_bounds(cur) {
            squares.push(cur);

            if let Some(piece) = placement.piece_at(cur) {
                if piece.color == defender {
                    if allied.is_some() {
                        // Two defenders shield the origin; nothing behind them matters.
                        return Self::clear(direction, squares);
                    }
                    allied = Some(cur);
                } else {
                    if !piece.kind.slides_along(direction) {
                        return Self::clear(direction, squares);
                    }
                    let kind = if allied.is_some() {
                        SightKind::Pin
                    } else {
                        SightKind::Check
                    };
                    return Self {
                        direction,
                        squares,
                        kind,
                        attacker: Some(cur),
                        pinned: allied,
                    };
                }
            }

            cur = cur + direction;
        }

        Self::clear(direction, squares)
    }

    /// A single-hop attack from `attacker` onto `origin`.
    pub fn jump(origin: Coord, attacker: Coord) -> Self {
        Self {
            direction: attacker - origin,
            squares: vec![attacker],
            kind: SightKind::Check,
            attacker: Some(attacker),
            pinned: None,
        }
    }

    fn clear(direction: Coord, squares: Vec<Coord>) -> Self {
        Self {
            direction,
            squares,
            kind: SightKind::Clear,
            attacker: None,
            pinned: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> SightKind {
        self.kind
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.kind == SightKind::Check
    }

    #[inline]
    pub fn is_pin(&self) -> bool {
        self.kind == SightKind::Pin
    }

    #[inline]
    pub fn direction(&self) -> Coord {
        self.direction
    }

    #[inline]
    pub fn attacker(&self) -> Option<Coord> {
        self.attacker
    }

    #[inline]
    pub fn pinned(&self) -> Option<Coord> {
        self.pinned
    }

    #[inline]
    pub fn squares(&self) -> &[Coord] {
        &self.squares
    }

    /// For a check: the squares where a defender could block or capture.
    /// For a pin: the squares the pinned piece may still occupy.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.squares.contains(&coord)
    }
}
