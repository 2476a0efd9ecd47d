//! Piece placement on a fixed-size rectangular board.
//!
//! `Placement` owns the coordinate→piece map together with the board
//! dimensions. Only occupied squares are stored; there are no sentinel
//! entries for the board edge, so every ray step asks [`Placement::in_bounds`].

use std::collections::HashMap;

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::coord::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    width: i32,
    height: i32,
    pieces: HashMap<Coord, Piece>,
}

impl Placement {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pieces: HashMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.width).contains(&coord.x) && (0..self.height).contains(&coord.y)
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.pieces.get(&coord)
    }

    #[inline]
    pub fn has_piece_at(&self, coord: Coord) -> bool {
        self.pieces.contains_key(&coord)
    }

    #[inline]
    pub fn color_at(&self, coord: Coord) -> Option<Color> {
        self.piece_at(coord).map(|p| p.color)
    }

    /// Puts `piece` on `coord`, stamping the coordinate onto the piece and
    /// returning whatever stood there before.
    pub fn place(&mut self, coord: Coord, mut piece: Piece) -> Option<Piece> {
        piece.coord = coord;
        self.pieces.insert(coord, piece)
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.pieces.remove(&coord)
    }

    /// Moves the piece on `from` to `to`, discarding the destination
    /// occupant. Returns the captured piece, if any.
    pub fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let piece = self.pieces.remove(&from)?;
        self.place(to, piece)
    }

    /// First king of `color`; positions are assumed to hold exactly one.
    pub fn king_of(&self, color: Color) -> Option<Coord> {
        self.pieces
            .values()
            .find(|p| p.is(PieceKind::King, color))
            .map(|p| p.coord)
    }

    /// Copy of the coordinate→piece map that shares nothing with `self`.
    pub fn snapshot(&self) -> HashMap<Coord, Piece> {
        self.pieces.clone()
    }
}
