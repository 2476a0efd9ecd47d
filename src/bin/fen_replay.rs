//! Replays a sequence of coordinate-notation moves from a FEN position.
//!
//! Usage:
//! `cargo run --bin fen_replay -- e2e4 e7e5 g1f3`
//! `cargo run --bin fen_replay -- --fen "r3k4r/pppppppppp/91/91/91/91/PPPPPPPPPP/R3K4R w KQkq - 0 1" e1c1`
//! `cargo run --bin fen_replay -- --render e2e4`

use fenboard::game_state::chess_rules::STARTING_POSITION_FEN;
use fenboard::game_state::chess_types::ChessMove;
use fenboard::game_state::chessboard::Chessboard;
use fenboard::utils::render_game_state::render_game_state;

struct ReplayArgs {
    fen: String,
    render: bool,
    moves: Vec<String>,
}

fn parse_args() -> Result<ReplayArgs, String> {
    let mut parsed = ReplayArgs {
        fen: STARTING_POSITION_FEN.to_owned(),
        render: false,
        moves: Vec::new(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fen" => {
                parsed.fen = args.next().ok_or("--fen needs a FEN string")?;
            }
            "--render" => parsed.render = true,
            _ if arg.starts_with("--") => return Err(format!("unknown flag: {arg}")),
            _ => parsed.moves.push(arg),
        }
    }

    Ok(parsed)
}

fn main() -> Result<(), String> {
    let args = parse_args()?;
    let mut board = Chessboard::from_fen(&args.fen).map_err(|e| e.to_string())?;

    println!("start: {board}");
    if args.render {
        println!("{}", render_game_state(&board));
    }

    for token in &args.moves {
        let mv: ChessMove = token.parse().map_err(|e| format!("{token}: {e}"))?;
        board.apply_move(&mv).map_err(|e| format!("{token}: {e}"))?;

        println!("{token}: {board}");
        if args.render {
            println!("{}", render_game_state(&board));
        }
        if board.is_king_checked() {
            println!("Check!");
        }
    }

    Ok(())
}
