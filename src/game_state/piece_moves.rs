//! Piece-specific move execution.
//!
//! Carries out the side effects a move has beyond relocating one piece:
//! removing a pawn captured en passant, bringing the rook across when the
//! king castles, and promoting a pawn that reaches its last rank. Legality
//! is not checked here; moves arrive pre-validated.

use crate::game_state::castling_tracker::CastlingTracker;
use crate::game_state::chess_rules::DEFAULT_PROMOTION;
use crate::game_state::chess_types::{ChessMove, Color, Piece, PieceKind};
use crate::game_state::coord::Coord;
use crate::game_state::placement::Placement;

/// What executing a move did besides relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    pub en_passant_capture: bool,
    pub castled_rook: Option<(Coord, Coord)>,
    pub promoted_to: Option<PieceKind>,
}

/// Applies `mv` for `mover` to `placement`.
pub fn execute_move(
    placement: &mut Placement,
    castling: &CastlingTracker,
    mover: Piece,
    mv: &ChessMove,
    en_passant_square: Option<Coord>,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    if mover.kind == PieceKind::Pawn
        && en_passant_square == Some(mv.to)
        && mv.from.x != mv.to.x
        && !placement.has_piece_at(mv.to)
    {
        outcome.captured = placement.remove(Coord::new(mv.to.x, mv.from.y));
        outcome.en_passant_capture = outcome.captured.is_some();
    }

    if let Some((rook_from, rook_to)) = castling.rook_path(&mover, mv.to) {
        if placement
            .piece_at(rook_from)
            .is_some_and(|p| p.is(PieceKind::Rook, mover.color))
        {
            placement.relocate(rook_from, rook_to);
            outcome.castled_rook = Some((rook_from, rook_to));
        }
    }

    if let Some(captured) = placement.relocate(mv.from, mv.to) {
        outcome.captured = Some(captured);
    }

    if mover.kind == PieceKind::Pawn && is_last_rank(placement, mover.color, mv.to) {
        let kind = mv.promotion.unwrap_or(DEFAULT_PROMOTION);
        promote(placement, mv.to, kind);
        outcome.promoted_to = Some(kind);
    }

    outcome
}

/// Replaces the pawn on `coord` with a `kind` of the same color. Returns the
/// piece now standing there, or `None` when no pawn was found.
pub fn promote(placement: &mut Placement, coord: Coord, kind: PieceKind) -> Option<Piece> {
    let pawn = placement.remove(coord)?;
    if pawn.kind != PieceKind::Pawn {
        placement.place(coord, pawn);
        return None;
    }
    let promoted = Piece::new(kind, pawn.color, coord);
    placement.place(coord, promoted);
    Some(promoted)
}

/// Rank on which `color`'s pawns promote.
#[inline]
pub fn is_last_rank(placement: &Placement, color: Color, coord: Coord) -> bool {
    match color {
        Color::White => coord.y == placement.height() - 1,
        Color::Black => coord.y == 0,
    }
}
