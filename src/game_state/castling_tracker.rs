//! Castling rights.
//!
//! Rights are stored as "has moved" flags per color. Once a flag is set it
//! stays set. Home squares are fixed at setup: the king's square at
//! construction and the two corners of that king's rank.

use log::debug;

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::check_tracker::CheckTracker;
use crate::game_state::coord::Coord;
use crate::game_state::placement::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File step from the king toward this side's rook.
    #[inline]
    pub const fn file_step(self) -> i32 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    #[inline]
    pub fn fen_char(self, color: Color) -> char {
        let c = match self {
            CastleSide::Kingside => 'k',
            CastleSide::Queenside => 'q',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovedFlags {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl MovedFlags {
    #[inline]
    fn rook_moved(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved,
            CastleSide::Queenside => self.queenside_rook_moved,
        }
    }

    #[inline]
    pub fn has_right(&self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastlingTracker {
    flags: [MovedFlags; 2],
    king_homes: [Option<Coord>; 2],
    width: i32,
}

impl CastlingTracker {
    /// Seeds the flags from FEN castling entries: a missing entry counts as
    /// the corresponding piece having moved. Flags are then reconciled with
    /// the placement so rights without a king or rook at home are dropped.
    pub fn new(placement: &Placement, rights: &[(Color, CastleSide)]) -> Self {
        let mut flags = [MovedFlags::default(); 2];
        let mut king_homes = [None; 2];

        for color in [Color::White, Color::Black] {
            let has = |side| rights.contains(&(color, side));
            let f = &mut flags[color.index()];
            f.kingside_rook_moved = !has(CastleSide::Kingside);
            f.queenside_rook_moved = !has(CastleSide::Queenside);
            f.king_moved = f.kingside_rook_moved && f.queenside_rook_moved;

            if !f.king_moved {
                king_homes[color.index()] = placement.king_of(color);
            }
        }

        let mut tracker = Self {
            flags,
            king_homes,
            width: placement.width(),
        };
        tracker.update(placement);
        tracker
    }

    /// Marks pieces that have left their home squares. Runs after every
    /// move; a rook captured on its corner also loses the right.
    pub fn update(&mut self, placement: &Placement) {
        for color in [Color::White, Color::Black] {
            let before = self.flags[color.index()];
            let Some(home) = self.king_homes[color.index()] else {
                self.flags[color.index()].king_moved = true;
                continue;
            };

            let holds = |coord: Coord, kind| placement.piece_at(coord).is_some_and(|p| p.is(kind, color));
            let kingside_rook = self.rook_home(home, CastleSide::Kingside);
            let queenside_rook = self.rook_home(home, CastleSide::Queenside);

            let f = &mut self.flags[color.index()];
            f.king_moved |= !holds(home, PieceKind::King);
            f.kingside_rook_moved |= !holds(kingside_rook, PieceKind::Rook);
            f.queenside_rook_moved |= !holds(queenside_rook, PieceKind::Rook);

            if *f != before {
                debug!("{color:?} castling flags now {f:?}");
            }
        }
    }

    #[inline]
    fn rook_home(&self, king_home: Coord, side: CastleSide) -> Coord {
        match side {
            CastleSide::Kingside => Coord::new(self.width - 1, king_home.y),
            CastleSide::Queenside => Coord::new(0, king_home.y),
        }
    }

    #[inline]
    pub fn flags(&self, color: Color) -> MovedFlags {
        self.flags[color.index()]
    }

    #[inline]
    pub fn has_right(&self, color: Color, side: CastleSide) -> bool {
        self.flags[color.index()].has_right(side)
    }

    /// When moving `king` to `to` is a castling move, the rook's start and
    /// landing squares.
    pub fn rook_path(&self, king: &Piece, to: Coord) -> Option<(Coord, Coord)> {
        let d = to - king.coord;
        if king.kind != PieceKind::King || d.y != 0 || d.x.abs() != 2 {
            return None;
        }
        let side = if d.x > 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let step = side.file_step();
        Some((
            self.rook_home(king.coord, side),
            king.coord.offset(step, 0),
        ))
    }

    /// Destinations the king on `king` may castle to right now.
    ///
    /// A destination is listed when the right is intact, the king is not
    /// attacked, the corner rook is in place with only empty squares
    /// between it and the king, and neither square the king passes over
    /// (destination included) is attacked.
    pub fn valid_castle_coords(
        &self,
        placement: &Placement,
        tracker: &CheckTracker,
        king: Coord,
    ) -> Vec<Coord> {
        let Some(piece) = placement.piece_at(king).filter(|p| p.kind == PieceKind::King) else {
            return Vec::new();
        };
        let color = piece.color;
        if self.king_homes[color.index()] != Some(king) || tracker.is_coord_attacked(placement, king) {
            return Vec::new();
        }

        CastleSide::BOTH
            .into_iter()
            .filter(|&side| self.has_right(color, side))
            .filter_map(|side| {
                let step = side.file_step();
                let rook = self.rook_home(king, side);
                if !placement.piece_at(rook).is_some_and(|p| p.is(PieceKind::Rook, color)) {
                    return None;
                }

                let mut between = king.offset(step, 0);
                while between != rook {
                    if placement.has_piece_at(between) {
                        return None;
                    }
                    between = between.offset(step, 0);
                }

                let transit = [king.offset(step, 0), king.offset(2 * step, 0)];
                let safe = transit
                    .iter()
                    .all(|&c| placement.in_bounds(c) && !tracker.is_coord_attacked(placement, c));
                safe.then_some(transit[1])
            })
            .collect()
    }

    /// Castling field of a FEN string, `KQkq` order, `-` when empty.
    pub fn rights_field(&self) -> String {
        let mut out = String::new();
        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if self.has_right(color, side) {
                    out.push(side.fen_char(color));
                }
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }
}
