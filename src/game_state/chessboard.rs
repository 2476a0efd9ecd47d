//! The board aggregate.
//!
//! `Chessboard` owns the placement, the turn, the move counters, the
//! en-passant square, and the castling and check trackers. It is built once
//! per game and mutated in place by every move; callers that need history
//! keep their own copies via [`Chessboard::board_snapshot`] or `Clone`.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::errors::Errors;
use crate::game_state::castling_tracker::CastlingTracker;
use crate::game_state::check_tracker::CheckTracker;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{ChessMove, Color, Piece, PieceKind};
use crate::game_state::coord::Coord;
use crate::game_state::line_of_sight::LineOfSight;
use crate::game_state::piece_moves::{self, MoveOutcome};
use crate::game_state::placement::Placement;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct Chessboard {
    placement: Placement,
    turn: Color,
    castling: CastlingTracker,
    en_passant_square: Option<Coord>,
    half_move_clock: u32,
    full_move_number: u32,
    check_trackers: [CheckTracker; 2],
}

impl Default for Chessboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Chessboard {
    /// The classical 8x8 starting position.
    pub fn new() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Builds a board of any rectangular size from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, Errors> {
        let record = parse_fen(fen)?;
        let placement = record.placement;

        // Both trackers are built directly for their color, so the turn and
        // the full-move number are taken from the FEN unchanged.
        let check_trackers = [
            CheckTracker::new(Color::White, &placement),
            CheckTracker::new(Color::Black, &placement),
        ];
        let castling = CastlingTracker::new(&placement, &record.castling);

        Ok(Self {
            placement,
            turn: record.turn,
            castling,
            en_passant_square: record.en_passant,
            half_move_clock: record.half_move_clock,
            full_move_number: record.full_move_number,
            check_trackers,
        })
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Applies a pre-validated move for the side to move.
    ///
    /// The source must hold a piece of the side to move and both endpoints
    /// must lie on the board; otherwise `InvariantViolation` is returned and
    /// the board is left untouched.
    pub fn apply_move(&mut self, mv: &ChessMove) -> Result<MoveOutcome, Errors> {
        let mover = self.check_move_preconditions(mv)?;

        self.update_half_move_clock(mv, &mover);
        let outcome = piece_moves::execute_move(
            &mut self.placement,
            &self.castling,
            mover,
            mv,
            self.en_passant_square,
        );
        self.castling.update(&self.placement);
        self.update_en_passant_square(mv, mover.color);
        self.switch_turns();

        debug!("{:?} {:?} moved {mv}, {:?} to move", mover.color, mover.kind, self.turn);

        // Only the side now to move gets fresh checks and pins.
        let placement = &self.placement;
        self.check_trackers[self.turn.index()].update(placement, mv, outcome.en_passant_capture);

        Ok(outcome)
    }

    fn check_move_preconditions(&self, mv: &ChessMove) -> Result<Piece, Errors> {
        if !self.coord_in_board(mv.from) || !self.coord_in_board(mv.to) {
            return Err(Errors::InvariantViolation(format!(
                "move {mv} leaves the {}x{} board",
                self.width(),
                self.height()
            )));
        }
        let mover = *self
            .placement
            .piece_at(mv.from)
            .ok_or_else(|| Errors::InvariantViolation(format!("move {mv} starts on an empty square")))?;
        if mover.color != self.turn {
            return Err(Errors::InvariantViolation(format!(
                "move {mv} moves a {:?} piece on {:?}'s turn",
                mover.color, self.turn
            )));
        }
        if let Some(kind) = mv.promotion.filter(|k| !k.is_promotion_target()) {
            return Err(Errors::InvariantViolation(format!(
                "a pawn cannot promote to {kind:?}"
            )));
        }
        Ok(mover)
    }

    fn update_half_move_clock(&mut self, mv: &ChessMove, mover: &Piece) {
        if self.placement.has_piece_at(mv.to) || mover.kind == PieceKind::Pawn {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }
    }

    fn update_en_passant_square(&mut self, mv: &ChessMove, mover: Color) {
        let forward = Coord::new(0, mover.forward());
        let is_pawn = self
            .placement
            .piece_at(mv.to)
            .is_some_and(|p| p.kind == PieceKind::Pawn);

        self.en_passant_square = if is_pawn
            && mv.moved_by() == forward * 2
            && self.has_neighboring_enemy_pawn(mv.to, mover)
        {
            Some(mv.from + forward)
        } else {
            None
        };
    }

    fn has_neighboring_enemy_pawn(&self, coord: Coord, mover: Color) -> bool {
        [coord.offset(1, 0), coord.offset(-1, 0)].into_iter().any(|c| {
            self.placement
                .piece_at(c)
                .is_some_and(|p| p.is(PieceKind::Pawn, mover.opposite()))
        })
    }

    fn switch_turns(&mut self) {
        if self.turn == Color::Black {
            self.full_move_number = self.full_move_number.saturating_add(1);
        }
        self.turn = self.turn.opposite();
    }

    /// Replaces the pawn on `coord` with a `kind` of the pawn's color and
    /// refreshes the side to move's checks and pins.
    pub fn promote_pawn(&mut self, coord: Coord, kind: PieceKind) -> Result<Piece, Errors> {
        if !kind.is_promotion_target() {
            return Err(Errors::InvariantViolation(format!(
                "a pawn cannot promote to {kind:?}"
            )));
        }
        if !self.placement.piece_at(coord).is_some_and(|p| p.kind == PieceKind::Pawn) {
            return Err(Errors::InvariantViolation(format!("no pawn to promote on {coord}")));
        }

        let promoted = piece_moves::promote(&mut self.placement, coord, kind)
            .ok_or_else(|| Errors::InvariantViolation(format!("no pawn to promote on {coord}")))?;
        debug!("pawn on {coord} promoted to {:?} {:?}", promoted.color, promoted.kind);
        self.check_trackers[self.turn.index()].recompute(&self.placement);
        Ok(promoted)
    }

    /// Raw placement primitive for piece-specific move execution. Trackers
    /// are not refreshed; the surrounding move does that.
    pub fn place_piece(&mut self, coord: Coord, piece: Piece) -> Result<Option<Piece>, Errors> {
        if !self.coord_in_board(coord) {
            return Err(Errors::InvariantViolation(format!(
                "cannot place a piece off the board at {coord}"
            )));
        }
        Ok(self.placement.place(coord, piece))
    }

    /// Raw removal primitive, see [`Chessboard::place_piece`].
    pub fn remove_piece(&mut self, coord: Coord) -> Option<Piece> {
        self.placement.remove(coord)
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.placement.piece_at(coord)
    }

    #[inline]
    pub fn has_piece_at(&self, coord: Coord) -> bool {
        self.placement.has_piece_at(coord)
    }

    #[inline]
    pub fn coord_in_board(&self, coord: Coord) -> bool {
        self.placement.in_bounds(coord)
    }

    /// True if the piece on `coord` belongs to the side to move.
    pub fn is_allied_piece(&self, coord: Coord) -> bool {
        self.placement.color_at(coord) == Some(self.turn)
    }

    pub fn is_enemy_piece(&self, coord: Coord) -> bool {
        self.placement.color_at(coord) == Some(self.turn.opposite())
    }

    #[inline]
    pub fn current_color(&self) -> Color {
        self.turn
    }

    #[inline]
    fn current_check_tracker(&self) -> &CheckTracker {
        &self.check_trackers[self.turn.index()]
    }

    pub fn check_tracker(&self, color: Color) -> &CheckTracker {
        &self.check_trackers[color.index()]
    }

    pub fn is_king_checked(&self) -> bool {
        self.current_check_tracker().is_checked()
    }

    pub fn checks(&self) -> &[LineOfSight] {
        self.current_check_tracker().checks()
    }

    pub fn pins(&self) -> &[LineOfSight] {
        self.current_check_tracker().pins()
    }

    /// Whether the opponent of the side to move attacks `coord`.
    pub fn is_coord_attacked(&self, coord: Coord) -> bool {
        self.current_check_tracker()
            .is_coord_attacked(&self.placement, coord)
    }

    /// Castle destinations currently open to the king on `king`.
    pub fn castling_rights(&self, king: Coord) -> Vec<Coord> {
        let Some(color) = self.placement.color_at(king) else {
            return Vec::new();
        };
        self.castling
            .valid_castle_coords(&self.placement, &self.check_trackers[color.index()], king)
    }

    #[inline]
    pub fn castling(&self) -> &CastlingTracker {
        &self.castling
    }

    pub fn is_en_passant_square(&self, coord: Coord) -> bool {
        self.en_passant_square == Some(coord)
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Coord> {
        self.en_passant_square
    }

    #[inline]
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.full_move_number
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.placement.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.placement.height()
    }

    pub fn king_coord(&self, color: Color) -> Option<Coord> {
        self.placement.king_of(color)
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Deep copy of the position map; edits to it never reach the board.
    pub fn board_snapshot(&self) -> HashMap<Coord, Piece> {
        self.placement.snapshot()
    }
}

impl fmt::Display for Chessboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::Chessboard;
    use crate::errors::Errors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{ChessMove, Color, Piece, PieceKind};
    use crate::game_state::coord::Coord;

    fn sq(s: &str) -> Coord {
        s.parse().expect("test square should parse")
    }

    fn play(board: &mut Chessboard, moves: &[&str]) {
        for m in moves {
            let mv: ChessMove = m.parse().expect("test move should parse");
            board.apply_move(&mv).expect("test move should apply");
        }
    }

    #[test]
    fn e2e4_from_start() {
        let mut board = Chessboard::new();
        assert_eq!(board.to_fen(), STARTING_POSITION_FEN);

        play(&mut board, &["e2e4"]);
        assert_eq!(board.current_color(), Color::Black);
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.half_move_clock(), 0);
        assert_eq!(board.full_move_number(), 1);
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn kingside_castle() {
        let mut board =
            Chessboard::from_fen("rnbqk2r/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R w KQkq - 0 1").expect("FEN should parse");
        assert_eq!(board.castling_rights(sq("e1")), vec![sq("g1")]);
        assert_eq!(board.castling_rights(sq("e8")), vec![sq("g8")]);

        play(&mut board, &["e1g1"]);
        assert!(board.piece_at(sq("g1")).is_some_and(|p| p.is(PieceKind::King, Color::White)));
        assert!(board.piece_at(sq("f1")).is_some_and(|p| p.is(PieceKind::Rook, Color::White)));
        assert!(!board.has_piece_at(sq("h1")));
        assert_eq!(
            board.to_fen(),
            "rnbqk2r/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1RK1 b kq - 1 1"
        );

        play(&mut board, &["e8g8"]);
        assert_eq!(
            board.to_fen(),
            "rnbq1rk1/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1RK1 w - - 2 2"
        );
    }

    #[test]
    fn castling_on_a_wide_board() {
        let mut board = Chessboard::from_fen("r3k4r/pppppppppp/91/91/91/91/PPPPPPPPPP/R3K4R w KQkq - 0 1")
            .expect("FEN should parse");
        assert_eq!(board.castling_rights(sq("e1")), vec![sq("g1"), sq("c1")]);

        play(&mut board, &["e1c1"]);
        assert_eq!(
            board.to_fen(),
            "r3k4r/pppppppppp/91/91/91/91/PPPPPPPPPP/2KR5R b kq - 1 1"
        );
    }

    #[test]
    fn failed_move_leaves_board_untouched() {
        let mut board = Chessboard::new();
        let before = board.to_fen();

        let attempts = [
            ChessMove::new(sq("e4"), sq("e5")),
            ChessMove::new(sq("e7"), sq("e5")),
            ChessMove::new(sq("a1"), Coord::new(-1, 0)),
            ChessMove::new(sq("h2"), sq("h9")),
            ChessMove::new(sq("b1"), Coord::new(30, 0)),
            ChessMove::new(sq("c2"), Coord::new(0, -2)),
            ChessMove::new(sq("b2"), sq("b4")).with_promotion(PieceKind::King),
        ];
        for mv in attempts {
            let err = board.apply_move(&mv).expect_err("move should be refused");
            assert!(matches!(err, Errors::InvariantViolation(_)), "{mv:?} gave {err:?}");
            assert_eq!(board.to_fen(), before);
        }

        let off_board = ChessMove::new(sq("a1"), Coord::new(-1, 0));
        let err = board.apply_move(&off_board).expect_err("off-board move should be refused");
        assert!(err.to_string().contains("a1(-1, 0)"), "{err}");
    }

    #[test]
    fn malformed_fen_produces_no_board() {
        let err = Chessboard::from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect_err("uneven rows should fail");
        assert!(matches!(err, Errors::MalformedPosition(_)));
    }

    #[test]
    fn move_counters() {
        let mut board = Chessboard::new();
        let expected = [
            ("e2e4", 0, 1),
            ("e7e5", 0, 2),
            ("g1f3", 1, 2),
            ("b8c6", 2, 3),
            ("f1c4", 3, 3),
            ("g8f6", 4, 4),
            ("f3e5", 0, 4),
            ("c6e5", 0, 5),
        ];
        for (m, half, full) in expected {
            play(&mut board, &[m]);
            assert_eq!(board.half_move_clock(), half, "after {m}");
            assert_eq!(board.full_move_number(), full, "after {m}");
        }
    }

    #[test]
    fn full_move_number_survives_setup() {
        for fen in ["8/8/8/8/8/8/8/K6k w - - 5 17", "8/8/8/8/8/8/8/K6k b - - 5 17"] {
            let board = Chessboard::from_fen(fen).expect("FEN should parse");
            assert_eq!(board.full_move_number(), 17);
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn counters_hold_at_their_ceiling() {
        let mut board = Chessboard::from_fen("4k3/8/8/8/8/8/8/4K1N1 w - - 4294967295 1").expect("FEN should parse");
        play(&mut board, &["g1f3"]);
        assert_eq!(board.half_move_clock(), u32::MAX);

        let mut board = Chessboard::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").expect("FEN should parse");
        play(&mut board, &["e8d8"]);
        assert_eq!(board.full_move_number(), u32::MAX);
        assert_eq!(board.to_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 1 4294967295");
    }

    #[test]
    fn en_passant_window() {
        let mut board = Chessboard::new();
        play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert!(board.is_en_passant_square(sq("d6")));
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
        );

        let mut declined = board.clone();
        play(&mut declined, &["g1f3"]);
        assert_eq!(declined.en_passant_square(), None);

        let mv: ChessMove = "e5d6".parse().expect("move should parse");
        let outcome = board.apply_move(&mv).expect("en passant should apply");
        assert!(outcome.en_passant_capture);
        assert!(!board.has_piece_at(sq("d5")));
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn double_step_without_neighbor_sets_nothing() {
        let mut board = Chessboard::new();
        play(&mut board, &["e2e4", "d7d5"]);
        assert_eq!(board.en_passant_square(), None);
    }

    #[test]
    fn pin_becomes_check_when_blocker_leaves() {
        let mut board = Chessboard::from_fen("4k3/8/8/8/1b6/8/3B4/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!board.is_king_checked());
        assert_eq!(board.pins().len(), 1);
        assert_eq!(board.pins()[0].pinned(), Some(sq("d2")));

        play(&mut board, &["d2e3"]);
        // White's tracker keeps its pre-move view until White is to move again.
        assert_eq!(board.check_tracker(Color::White).pins().len(), 1);
        assert!(!board.check_tracker(Color::White).is_checked());

        play(&mut board, &["e8d8"]);
        assert!(board.is_king_checked());
        assert!(board.pins().is_empty());
        assert_eq!(board.checks()[0].attacker(), Some(sq("b4")));
    }

    #[test]
    fn mover_tracker_is_stale_until_its_next_turn() {
        let mut board = Chessboard::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert!(board.is_king_checked());

        play(&mut board, &["e1e2"]);
        assert!(board.check_tracker(Color::White).is_checked());
        assert!(!board.is_king_checked());

        play(&mut board, &["e8d8"]);
        assert!(!board.is_king_checked());
        assert!(!board.check_tracker(Color::White).is_checked());
        let (mv, en_passant) = board
            .check_tracker(Color::White)
            .refreshed_after()
            .expect("white tracker was refreshed");
        assert_eq!(mv.to_string(), "e8d8");
        assert!(!en_passant);
    }

    #[test]
    fn promotion_defaults_to_queen_and_honours_choice() {
        let fen = "8/P6k/8/8/8/8/p7/KN6 w - - 0 1";
        let mut board = Chessboard::from_fen(fen).expect("FEN should parse");
        play(&mut board, &["a7a8"]);
        assert!(board.piece_at(sq("a8")).is_some_and(|p| p.is(PieceKind::Queen, Color::White)));

        let mut board = Chessboard::from_fen(fen).expect("FEN should parse");
        play(&mut board, &["a7a8n", "a2b1r"]);
        assert!(board.piece_at(sq("a8")).is_some_and(|p| p.is(PieceKind::Knight, Color::White)));
        assert!(board.piece_at(sq("b1")).is_some_and(|p| p.is(PieceKind::Rook, Color::Black)));
        assert!(board.is_king_checked(), "rook on b1 checks a1");
        assert_eq!(board.to_fen(), "N7/7k/8/8/8/8/8/Kr6 w - - 0 2");
    }

    #[test]
    fn promote_pawn_directly() {
        let mut board = Chessboard::from_fen("k7/8/8/8/8/8/8/K3P3 w - - 0 1").expect("FEN should parse");
        let promoted = board
            .promote_pawn(sq("e1"), PieceKind::Bishop)
            .expect("pawn should promote");
        assert!(promoted.is(PieceKind::Bishop, Color::White));

        assert!(matches!(
            board.promote_pawn(sq("e1"), PieceKind::Queen),
            Err(Errors::InvariantViolation(_))
        ));
        assert!(matches!(
            board.promote_pawn(sq("a1"), PieceKind::Pawn),
            Err(Errors::InvariantViolation(_))
        ));
    }

    #[test]
    fn queries_and_primitives() {
        let mut board = Chessboard::new();
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 8);
        assert!(board.coord_in_board(sq("h8")));
        assert!(!board.coord_in_board(Coord::new(8, 0)));
        assert!(board.is_allied_piece(sq("a2")));
        assert!(board.is_enemy_piece(sq("a7")));
        assert!(!board.is_enemy_piece(sq("a4")));
        assert_eq!(board.king_coord(Color::Black), Some(sq("e8")));
        assert!(board.is_coord_attacked(sq("f6")));
        assert!(!board.is_coord_attacked(sq("e4")));

        let mut snapshot = board.board_snapshot();
        snapshot.remove(&sq("e1"));
        assert!(board.has_piece_at(sq("e1")));

        let knight = Piece::new(PieceKind::Knight, Color::Black, Coord::ORIGIN);
        assert!(board.place_piece(Coord::new(3, 8), knight).is_err());
        let displaced = board.place_piece(sq("e4"), knight).expect("e4 is on the board");
        assert!(displaced.is_none());
        assert_eq!(board.piece_at(sq("e4")).map(|p| p.coord), Some(sq("e4")));
        assert!(board.remove_piece(sq("e4")).is_some());
        assert_eq!(board.to_string(), STARTING_POSITION_FEN);
    }

    /// Builds a random rectangular position, encodes it by hand, and checks
    /// that parsing and regenerating gives back the same text.
    #[test]
    fn random_boards_round_trip() {
        const LETTERS: &[u8] = b"pnbrqkPNBRQK";
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let width = rng.random_range(1..=26);
            let height = rng.random_range(1..=12);

            let mut rows = Vec::new();
            for _ in 0..height {
                let mut row = String::new();
                let mut run = 0;
                for _ in 0..width {
                    if rng.random_bool(0.3) {
                        while run > 9 {
                            row.push('9');
                            run -= 9;
                        }
                        if run > 0 {
                            row.push(char::from(b'0' + run));
                        }
                        run = 0;
                        row.push(char::from(LETTERS[rng.random_range(0..LETTERS.len())]));
                    } else {
                        run += 1;
                    }
                }
                while run > 9 {
                    row.push('9');
                    run -= 9;
                }
                if run > 0 {
                    row.push(char::from(b'0' + run));
                }
                rows.push(row);
            }

            let turn = if rng.random_bool(0.5) { 'w' } else { 'b' };
            let en_passant = if rng.random_bool(0.5) {
                Coord::new(rng.random_range(0..width), rng.random_range(0..height)).to_string()
            } else {
                "-".to_owned()
            };
            let fen = format!(
                "{} {turn} - {en_passant} {} {}",
                rows.join("/"),
                rng.random_range(0..100u32),
                rng.random_range(1..500u32)
            );

            let board = Chessboard::from_fen(&fen).expect("random FEN should parse");
            assert_eq!(board.width(), width);
            assert_eq!(board.height(), height);
            assert_eq!(board.to_fen(), fen);
        }
    }
}
