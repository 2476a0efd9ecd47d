//! Coordinate and move conversions for algebraic notation.
//!
//! Files are letters `a..z`, ranks are 1-based decimal numbers, so boards
//! taller than nine ranks use squares such as `c10`. Reused by the FEN
//! codec, `Coord`/`ChessMove` parsing, and the replay binary.

use crate::errors::Errors;
use crate::game_state::chess_rules::MAX_FILES;
use crate::game_state::coord::Coord;

/// Convert algebraic notation (for example: "e4") to a coordinate.
pub fn algebraic_to_coord(square: &str) -> Result<Coord, Errors> {
    let (coord, rest) = split_leading_square(square)?;
    if !rest.is_empty() {
        return Err(Errors::InvalidAlgebraic(format!(
            "trailing characters in square: {square}"
        )));
    }
    Ok(coord)
}

/// Convert a coordinate to algebraic notation (for example: "e4").
pub fn coord_to_algebraic(coord: Coord) -> Result<String, Errors> {
    if !(0..MAX_FILES).contains(&coord.x) || coord.y < 0 {
        return Err(Errors::InvalidAlgebraic(format!(
            "coordinate has no algebraic name: ({}, {})",
            coord.x, coord.y
        )));
    }

    let file_char = char::from(b'a' + coord.x as u8);
    Ok(format!("{file_char}{}", coord.y + 1))
}

/// Parse one square off the front of `text`, returning it with the
/// unconsumed remainder. Used to split move strings like "a9a10".
pub fn split_leading_square(text: &str) -> Result<(Coord, &str), Errors> {
    let file = match text.chars().next() {
        Some(c) if c.is_ascii_lowercase() => c,
        _ => {
            return Err(Errors::InvalidAlgebraic(format!(
                "expected a file letter in: {text}"
            )))
        }
    };

    let digits_end = text[1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| i + 1);
    let rank_text = &text[1..digits_end];

    let rank: i32 = rank_text
        .parse()
        .map_err(|_| Errors::InvalidAlgebraic(format!("expected a rank number in: {text}")))?;
    if rank < 1 || rank_text.starts_with('0') {
        return Err(Errors::InvalidAlgebraic(format!(
            "ranks start at 1, got {rank_text} in: {text}"
        )));
    }

    let x = (file as u8 - b'a') as i32;
    Ok((Coord::new(x, rank - 1), &text[digits_end..]))
}
