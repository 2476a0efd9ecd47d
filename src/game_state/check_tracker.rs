//! Per-color check and pin bookkeeping.
//!
//! One tracker exists per color for the lifetime of a board. After the
//! opponent moves, the tracker of the side now to move re-casts every ray
//! from its king and collects the lines that check it and the lines that pin
//! one of its pieces. The tracker of the side that just moved is left as is
//! until its own turn comes around again.

use log::trace;

use crate::game_state::chess_rules::{KING_STEPS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS};
use crate::game_state::chess_types::{ChessMove, Color, PieceKind};
use crate::game_state::coord::Coord;
use crate::game_state::line_of_sight::LineOfSight;
use crate::game_state::placement::Placement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTracker {
    color: Color,
    king: Option<Coord>,
    pins: Vec<LineOfSight>,
    checks: Vec<LineOfSight>,
    refreshed_after: Option<(ChessMove, bool)>,
}

impl CheckTracker {
    /// Builds the tracker for `color` and computes its initial state.
    pub fn new(color: Color, placement: &Placement) -> Self {
        let mut tracker = Self {
            color,
            king: None,
            pins: Vec::new(),
            checks: Vec::new(),
            refreshed_after: None,
        };
        tracker.recompute(placement);
        tracker
    }

    /// Recomputes pins and checks after `mv` has been applied to `placement`.
    /// `en_passant_capture` marks a move that also emptied the passed pawn's
    /// square, which can open a rank onto the king.
    pub fn update(&mut self, placement: &Placement, mv: &ChessMove, en_passant_capture: bool) {
        self.recompute(placement);
        self.refreshed_after = Some((*mv, en_passant_capture));
        trace!(
            "{:?} tracker refreshed after {mv}{}: {} check(s), {} pin(s)",
            self.color,
            if en_passant_capture { " (en passant)" } else { "" },
            self.checks.len(),
            self.pins.len()
        );
    }

    /// Re-derives the king square, pins and checks from `placement`.
    pub fn recompute(&mut self, placement: &Placement) {
        self.king = match self.king {
            Some(k) if placement.piece_at(k).is_some_and(|p| p.is(PieceKind::King, self.color)) => Some(k),
            _ => placement.king_of(self.color),
        };

        let (pins, checks) = match self.king {
            Some(king) => self.pins_and_checks(placement, king),
            None => (Vec::new(), Vec::new()),
        };
        self.pins = pins;
        self.checks = checks;
    }

    fn pins_and_checks(&self, placement: &Placement, king: Coord) -> (Vec<LineOfSight>, Vec<LineOfSight>) {
        let mut pins = Vec::new();
        let mut checks = Vec::new();

        for direction in QUEEN_DIRECTIONS {
            let los = LineOfSight::cast(placement, king, direction, self.color);
            if los.is_check() {
                checks.push(los);
            } else if los.is_pin() {
                pins.push(los);
            }
        }

        checks.extend(
            self.jump_attackers(placement, king)
                .map(|attacker| LineOfSight::jump(king, attacker)),
        );

        (pins, checks)
    }

    /// Enemy knights and pawns one hop away from `anchor`.
    fn jump_attackers<'a>(&'a self, placement: &'a Placement, anchor: Coord) -> impl Iterator<Item = Coord> + 'a {
        let enemy = self.color.opposite();
        let knights = KNIGHT_OFFSETS
            .iter()
            .map(move |&off| (anchor + off, PieceKind::Knight));
        let pawns = self
            .pawn_capture_offsets()
            .into_iter()
            .map(move |off| (anchor + off, PieceKind::Pawn));

        knights.chain(pawns).filter_map(move |(square, kind)| {
            placement
                .piece_at(square)
                .filter(|p| p.is(kind, enemy))
                .map(|_| square)
        })
    }

    /// Squares from which an enemy pawn would capture onto the anchor. They
    /// sit one rank ahead of the anchor in this color's forward direction.
    fn pawn_capture_offsets(&self) -> [Coord; 2] {
        let forward = self.color.forward();
        [Coord::new(-1, forward), Coord::new(1, forward)]
    }

    /// True when a piece of the opposing color attacks `coord` on the
    /// current placement, regardless of where this color's king stands.
    /// Every occupied square blocks, and an adjacent enemy king counts.
    pub fn is_coord_attacked(&self, placement: &Placement, coord: Coord) -> bool {
        let enemy = self.color.opposite();

        let slid = QUEEN_DIRECTIONS.iter().any(|&direction| {
            let mut cur = coord + direction;
            while placement.in_bounds(cur) {
                if let Some(piece) = placement.piece_at(cur) {
                    return piece.color == enemy && piece.kind.slides_along(direction);
                }
                cur = cur + direction;
            }
            false
        });
        if slid || self.jump_attackers(placement, coord).next().is_some() {
            return true;
        }

        KING_STEPS.iter().any(|&step| {
            placement
                .piece_at(coord + step)
                .is_some_and(|p| p.is(PieceKind::King, enemy))
        })
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn king(&self) -> Option<Coord> {
        self.king
    }

    #[inline]
    pub fn pins(&self) -> &[LineOfSight] {
        &self.pins
    }

    #[inline]
    pub fn checks(&self) -> &[LineOfSight] {
        &self.checks
    }

    #[inline]
    pub fn is_checked(&self) -> bool {
        !self.checks.is_empty()
    }

    /// The pin line constraining the piece on `coord`, if it is pinned.
    pub fn pin_through(&self, coord: Coord) -> Option<&LineOfSight> {
        self.pins.iter().find(|los| los.pinned() == Some(coord))
    }

    /// The move after which pins and checks were last recomputed, with its
    /// en-passant flag. `None` until the first update after setup.
    #[inline]
    pub fn refreshed_after(&self) -> Option<(ChessMove, bool)> {
        self.refreshed_after
    }
}
