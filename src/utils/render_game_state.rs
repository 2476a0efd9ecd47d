//! Terminal-oriented Unicode board renderer.
//!
//! Draws a board of any size for debugging and diagnostics. Files are
//! labelled `a..z` along the top and bottom, ranks on both sides, with the
//! rank column padded so multi-digit ranks stay aligned.

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::chessboard::Chessboard;
use crate::game_state::coord::Coord;

/// Render the board to a Unicode string for terminal output, top rank first.
pub fn render_game_state(board: &Chessboard) -> String {
    let label_width = board.height().to_string().len();
    let files = file_header(board.width(), label_width);

    let mut out = String::new();
    out.push_str(&files);
    out.push('\n');

    for y in (0..board.height()).rev() {
        let rank = y + 1;
        out.push_str(&format!("{rank:>label_width$} "));

        for x in 0..board.width() {
            match board.piece_at(Coord::new(x, y)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }
            if x < board.width() - 1 {
                out.push(' ');
            }
        }

        out.push_str(&format!(" {rank}\n"));
    }

    out.push_str(&files);
    out
}

fn file_header(width: i32, label_width: usize) -> String {
    let letters: Vec<String> = (0..width)
        .map(|x| char::from(b'a' + x as u8).to_string())
        .collect();
    format!("{} {}", " ".repeat(label_width), letters.join(" "))
}

fn piece_to_unicode(piece: &Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
