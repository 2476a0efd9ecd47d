//! Integer board coordinates.
//!
//! `x` counts files rightward from `a`, `y` counts ranks upward from `1`.
//! Coordinates are plain values; arithmetic never checks bounds, callers ask
//! the placement whether a coordinate lies on the board.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::errors::Errors;
use crate::utils::algebraic::{algebraic_to_coord, coord_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `dx` files and `dy` ranks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    #[inline]
    fn neg(self) -> Self::Output {
        Coord::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    #[inline]
    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl FromStr for Coord {
    type Err = Errors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_coord(s)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match coord_to_algebraic(*self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Coord;

    #[test]
    fn arithmetic() {
        let e2 = Coord::new(4, 1);
        assert_eq!(e2 + Coord::new(0, 2), Coord::new(4, 3));
        assert_eq!(e2.offset(-1, 1), Coord::new(3, 2));
        assert_eq!(Coord::new(1, -1) * 3, Coord::new(3, -3));
        assert_eq!(Coord::new(4, 3) - e2, Coord::new(0, 2));
        assert_eq!(-Coord::new(2, -1), Coord::new(-2, 1));
    }

    #[test]
    fn parses_and_displays_algebraic() {
        let e4: Coord = "e4".parse().expect("e4 should parse");
        assert_eq!(e4, Coord::new(4, 3));
        assert_eq!(e4.to_string(), "e4");

        let tall: Coord = "b12".parse().expect("b12 should parse");
        assert_eq!(tall, Coord::new(1, 11));
        assert_eq!(Coord::new(-1, 0).to_string(), "(-1, 0)");
    }
}
