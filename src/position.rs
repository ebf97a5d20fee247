//! Working position and move execution.
//!
//! A [`Position`] pairs a board with the per-color score accumulators that
//! search code credits as it plays moves. Both halves are plain `Copy`
//! data, so undo is done by restoring a snapshot taken before the move:
//!
//! ```
//! use prize_chess::board::{Board, Color};
//! use prize_chess::position::{Position, Scores, play_move};
//!
//! let mut pos = Position::new(Board::initial(), Scores::default());
//! let saved = pos.checkpoint();
//! play_move(&mut pos, "5040".parse().unwrap(), Color::White);
//! pos.restore(saved);
//! assert_eq!(pos.board, Board::initial());
//! ```

use log::debug;

use crate::board::{Board, Cell, Color, Kind};
use crate::constants::{LAST_ROW_BONUS, PRIZE_BONUS};
use crate::moves::Move;

/// Material credited to each color by moves made during a search
/// (or, in the match driver, during the game).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scores {
    pub white: i32,
    pub black: i32,
}

impl Scores {
    pub const fn new(white: i32, black: i32) -> Self {
        Self { white, black }
    }

    #[inline]
    pub fn get(&self, color: Color) -> i32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    pub fn add(&mut self, color: Color, amount: i32) {
        match color {
            Color::White => self.white += amount,
            Color::Black => self.black += amount,
        }
    }
}

/// Board plus score accumulators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub scores: Scores,
}

impl Position {
    pub fn new(board: Board, scores: Scores) -> Self {
        Self { board, scores }
    }

    /// Take a restore point.
    #[inline]
    pub fn checkpoint(&self) -> Position {
        *self
    }

    /// Return to a restore point taken with [`Position::checkpoint`].
    #[inline]
    pub fn restore(&mut self, saved: Position) {
        *self = saved;
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.board.game_over()
    }
}

/// Apply `mv` for `color`, crediting that color's accumulator.
///
/// - A pawn stepping onto the opponent's back rank leaves the board
///   together with whatever stood on the destination; the mover gains
///   [`LAST_ROW_BONUS`].
/// - Otherwise a prize on the destination is worth [`PRIZE_BONUS`], and the
///   mover is credited the value of the moving piece's kind before the
///   piece relocates.
///
/// No bounds or legality checks are made; moves are expected to come from
/// [`crate::moves::generate_moves`].
pub fn play_move(pos: &mut Position, mv: Move, color: Color) {
    let (fr, fc) = mv.from();
    let (tr, tc) = mv.to();

    let Some(piece) = pos.board.get(fr, fc).piece() else {
        debug!("play_move {mv}: no piece on source square");
        return;
    };

    if piece.kind == Kind::Pawn && tr == color.last_row() {
        pos.board.set(tr, tc, Cell::Empty);
        pos.board.set(fr, fc, Cell::Empty);
        pos.scores.add(color, LAST_ROW_BONUS);
        return;
    }

    if pos.board.get(tr, tc) == Cell::Prize {
        pos.scores.add(color, PRIZE_BONUS);
    }
    pos.scores.add(color, piece.kind.value());
    pos.board.set(tr, tc, Cell::Piece(piece));
    pos.board.set(fr, fc, Cell::Empty);
}
