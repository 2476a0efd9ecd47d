//! Position-to-FEN serializer.
//!
//! Writes the six FEN fields for a board of any size. Each digit in a row
//! stands for its own run of empty squares, so runs longer than nine are
//! split across several digits.

use crate::game_state::chessboard::Chessboard;
use crate::game_state::coord::Coord;
use crate::game_state::placement::Placement;
use crate::utils::algebraic::coord_to_algebraic;

pub fn generate_fen(board: &Chessboard) -> String {
    let en_passant = generate_en_passant_field(board.en_passant_square());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board.placement()),
        board.current_color().fen_char(),
        board.castling().rights_field(),
        en_passant,
        board.half_move_clock(),
        board.full_move_number()
    )
}

fn generate_board_field(placement: &Placement) -> String {
    let mut out = String::new();

    for y in (0..placement.height()).rev() {
        let mut empty_count = 0u32;

        for x in 0..placement.width() {
            match placement.piece_at(Coord::new(x, y)) {
                Some(piece) => {
                    push_empty_run(&mut out, empty_count);
                    empty_count = 0;
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        push_empty_run(&mut out, empty_count);

        if y > 0 {
            out.push('/');
        }
    }

    out
}

/// Each FEN digit is its own run, so runs longer than nine are written as
/// several digits that add up to the run ("93" for twelve squares).
fn push_empty_run(out: &mut String, mut run: u32) {
    while run > 9 {
        out.push('9');
        run -= 9;
    }
    if run > 0 {
        out.push(char::from(b'0' + run as u8));
    }
}

fn generate_en_passant_field(square: Option<Coord>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    coord_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}
