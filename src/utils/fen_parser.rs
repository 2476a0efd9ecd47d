//! FEN-to-position parser.
//!
//! Accepts any rectangular board: each placement row's width is the sum of
//! its digits (every digit is its own run of empty squares) plus one per
//! piece letter, and all rows must agree. The first row is the top rank.

use crate::errors::Errors;
use crate::game_state::castling_tracker::CastleSide;
use crate::game_state::chess_rules::MAX_FILES;
use crate::game_state::chess_types::{Color, Piece};
use crate::game_state::coord::Coord;
use crate::game_state::placement::Placement;
use crate::utils::algebraic::algebraic_to_coord;

/// The six FEN fields, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub placement: Placement,
    pub turn: Color,
    pub castling: Vec<(Color, CastleSide)>,
    pub en_passant: Option<Coord>,
    pub half_move_clock: u32,
    pub full_move_number: u32,
}

fn malformed(msg: impl Into<String>) -> Errors {
    Errors::MalformedPosition(msg.into())
}

pub fn parse_fen(fen: &str) -> Result<FenRecord, Errors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| malformed("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| malformed("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| malformed("missing half-move clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| malformed("missing full-move number"))?;

    if parts.next().is_some() {
        return Err(malformed("FEN has extra trailing fields"));
    }

    let placement = parse_board(board_part)?;
    let en_passant = parse_en_passant_square(en_passant_part, &placement)?;

    Ok(FenRecord {
        turn: parse_side_to_move(side_part)?,
        castling: parse_castling_rights(castling_part)?,
        en_passant,
        half_move_clock: halfmove_part
            .parse()
            .map_err(|_| malformed(format!("invalid half-move clock: {halfmove_part}")))?,
        full_move_number: fullmove_part
            .parse()
            .map_err(|_| malformed(format!("invalid full-move number: {fullmove_part}")))?,
        placement,
    })
}

/// Width contributed by one placement row.
fn row_width(row: &str) -> Result<i32, Errors> {
    row.chars().try_fold(0i32, |width, ch| match ch {
        '1'..='9' => Ok(width + ch.to_digit(10).map_or(0, |d| d as i32)),
        _ if Piece::from_fen_char(ch, Coord::ORIGIN).is_some() => Ok(width + 1),
        _ => Err(malformed(format!("invalid character '{ch}' in row \"{row}\""))),
    })
}

fn parse_board(board_part: &str) -> Result<Placement, Errors> {
    let rows: Vec<&str> = board_part.split('/').collect();

    let widths = rows.iter().map(|row| row_width(row)).collect::<Result<Vec<_>, _>>()?;
    let width = widths[0];
    if widths.iter().any(|&w| w != width) {
        return Err(malformed(format!(
            "board shape is not rectangular, row widths {widths:?}"
        )));
    }
    if width == 0 {
        return Err(malformed("board has no files"));
    }
    if width > MAX_FILES {
        return Err(malformed(format!("board is {width} files wide, at most {MAX_FILES} are supported")));
    }

    let height = rows.len() as i32;
    let mut placement = Placement::new(width, height);

    for (row_idx, row) in rows.iter().enumerate() {
        let y = height - 1 - row_idx as i32;
        let mut x = 0;

        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                x += run as i32;
                continue;
            }
            let coord = Coord::new(x, y);
            if let Some(piece) = Piece::from_fen_char(ch, coord) {
                placement.place(coord, piece);
            }
            x += 1;
        }
    }

    Ok(placement)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, Errors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(malformed(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<Vec<(Color, CastleSide)>, Errors> {
    if castling_part == "-" {
        return Ok(Vec::new());
    }

    castling_part
        .chars()
        .map(|ch| match ch {
            'K' => Ok((Color::White, CastleSide::Kingside)),
            'Q' => Ok((Color::White, CastleSide::Queenside)),
            'k' => Ok((Color::Black, CastleSide::Kingside)),
            'q' => Ok((Color::Black, CastleSide::Queenside)),
            _ => Err(malformed(format!("invalid castling rights character: {ch}"))),
        })
        .collect()
}

fn parse_en_passant_square(en_passant_part: &str, placement: &Placement) -> Result<Option<Coord>, Errors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let coord = algebraic_to_coord(en_passant_part)
        .map_err(|e| malformed(format!("invalid en-passant square: {e}")))?;
    if !placement.in_bounds(coord) {
        return Err(malformed(format!("en-passant square {en_passant_part} is off the board")));
    }
    Ok(Some(coord))
}
