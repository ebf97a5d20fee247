//! Moves and pseudo-legal move generation.
//!
//! A move is four board coordinates. Its wire form is the four-digit token
//! `fromRow fromCol toRow toCol`, e.g. `5040` moves the piece on row 5,
//! column 0 to row 4, column 0.
//!
//! Generation follows the variant's movement rules only. There is no check
//! detection: a move leaving the king en prise is still generated.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Cell, Color, Kind};
use crate::constants::{COLS, ROOK_RANGE, ROWS};
use crate::error::{EngineError, Result};

/// Orthogonal directions in generation order: up, down, left, right.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
}

impl Move {
    /// Build a move, rejecting coordinates outside the board.
    pub fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Result<Self> {
        if from_row >= ROWS || to_row >= ROWS || from_col >= COLS || to_col >= COLS {
            return Err(EngineError::InvalidMoveFormat(format!(
                "{from_row}{from_col}{to_row}{to_col}"
            )));
        }
        Ok(Self::new_unchecked(from_row, from_col, to_row, to_col))
    }

    #[inline]
    fn new_unchecked(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Self {
            from_row: from_row as u8,
            from_col: from_col as u8,
            to_row: to_row as u8,
            to_col: to_col as u8,
        }
    }

    #[inline]
    pub fn from(self) -> (usize, usize) {
        (self.from_row as usize, self.from_col as usize)
    }

    #[inline]
    pub fn to(self) -> (usize, usize) {
        (self.to_row as usize, self.to_col as usize)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.from_row, self.from_col, self.to_row, self.to_col
        )
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidMoveFormat(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let d: Vec<usize> = bytes.iter().map(|b| (b - b'0') as usize).collect();
        Move::new(d[0], d[1], d[2], d[3]).map_err(|_| invalid())
    }
}

/// Step from `(row, col)` by `(dr, dc)`, returning `None` off the board.
#[inline]
fn offset(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < ROWS && c < COLS).then_some((r, c))
}

/// Generate every pseudo-legal move for `color`.
///
/// Sources are scanned row-major. Within a piece the order is:
/// pawn ahead, diagonal left, diagonal right; rook and king up, down,
/// left, right. Minimax breaks ties by this order.
pub fn generate_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(32);
    for (row, col, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        match piece.kind {
            Kind::Pawn => pawn_moves(board, color, row, col, &mut moves),
            Kind::Rook => rook_moves(board, color, row, col, &mut moves),
            Kind::King => king_moves(board, color, row, col, &mut moves),
        }
    }
    moves
}

fn pawn_moves(board: &Board, color: Color, row: usize, col: usize, out: &mut Vec<Move>) {
    let dr = color.forward();

    // Straight ahead onto an empty cell or a prize, never a capture.
    if let Some((r, c)) = offset(row, col, dr, 0) {
        if matches!(board.get(r, c), Cell::Empty | Cell::Prize) {
            out.push(Move::new_unchecked(row, col, r, c));
        }
    }

    // Diagonals only capture.
    for dc in [-1, 1] {
        if let Some((r, c)) = offset(row, col, dr, dc) {
            if board.get(r, c).is_color(color.opponent()) {
                out.push(Move::new_unchecked(row, col, r, c));
            }
        }
    }
}

fn rook_moves(board: &Board, color: Color, row: usize, col: usize, out: &mut Vec<Move>) {
    for (dr, dc) in ORTHOGONAL {
        let (mut r, mut c) = (row, col);
        for _ in 0..ROOK_RANGE {
            let Some(next) = offset(r, c, dr, dc) else {
                break;
            };
            (r, c) = next;
            let cell = board.get(r, c);
            if cell.is_color(color) {
                break;
            }
            out.push(Move::new_unchecked(row, col, r, c));
            // Capture or prize ends the slide.
            if cell != Cell::Empty {
                break;
            }
        }
    }
}

fn king_moves(board: &Board, color: Color, row: usize, col: usize, out: &mut Vec<Move>) {
    for (dr, dc) in ORTHOGONAL {
        if let Some((r, c)) = offset(row, col, dr, dc) {
            if !board.get(r, c).is_color(color) {
                out.push(Move::new_unchecked(row, col, r, c));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn place(board: &mut Board, row: usize, col: usize, color: Color, kind: Kind) {
        board.set(row, col, Cell::Piece(Piece::new(color, kind)));
    }

    fn tokens(moves: &[Move]) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_parse_token() {
        let mv: Move = "5040".parse().unwrap();
        assert_eq!(mv.from(), (5, 0));
        assert_eq!(mv.to(), (4, 0));
        assert_eq!(mv.to_string(), "5040");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "504", "50401", "50a0", "7040", "5540", "-100"] {
            assert!(
                matches!(bad.parse::<Move>(), Err(EngineError::InvalidMoveFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Move::new(0, 0, 0, 5).is_err());
        assert!(Move::new(6, 4, 0, 0).is_ok());
    }

    #[test]
    fn test_pawn_blocked_by_piece_ahead() {
        let mut board = Board::empty();
        place(&mut board, 4, 2, Color::White, Kind::Pawn);
        place(&mut board, 3, 2, Color::Black, Kind::Rook);
        assert!(generate_moves(&board, Color::White).is_empty());
    }

    #[test]
    fn test_pawn_moves_onto_prize() {
        let mut board = Board::empty();
        place(&mut board, 4, 2, Color::White, Kind::Pawn);
        board.set(3, 2, Cell::Prize);
        assert_eq!(tokens(&generate_moves(&board, Color::White)), ["4232"]);
    }

    #[test]
    fn test_pawn_diagonal_captures_only_opponents() {
        let mut board = Board::empty();
        place(&mut board, 2, 2, Color::Black, Kind::Pawn);
        place(&mut board, 3, 1, Color::White, Kind::King);
        place(&mut board, 3, 3, Color::Black, Kind::Pawn);
        // Ahead (3,2) empty, left diagonal is a capture, right is our own.
        assert_eq!(tokens(&generate_moves(&board, Color::Black))[..2], ["2232", "2231"]);
    }

    #[test]
    fn test_pawn_on_edge_row_has_no_straight_move() {
        let mut board = Board::empty();
        place(&mut board, 0, 0, Color::White, Kind::Pawn);
        place(&mut board, 6, 4, Color::Black, Kind::Pawn);
        assert!(generate_moves(&board, Color::White).is_empty());
        assert!(generate_moves(&board, Color::Black).is_empty());
    }

    #[test]
    fn test_rook_range_limited() {
        let mut board = Board::empty();
        place(&mut board, 6, 0, Color::White, Kind::Rook);
        let moves = tokens(&generate_moves(&board, Color::White));
        assert_eq!(moves, ["6050", "6040", "6030", "6061", "6062", "6063"]);
    }

    #[test]
    fn test_rook_stops_on_capture_and_prize() {
        let mut board = Board::empty();
        place(&mut board, 3, 2, Color::White, Kind::Rook);
        place(&mut board, 1, 2, Color::Black, Kind::Pawn);
        board.set(3, 1, Cell::Prize);
        place(&mut board, 4, 2, Color::White, Kind::Pawn);
        let moves = tokens(&generate_moves(&board, Color::White));
        // up: 2,2 then capture on 1,2; down blocked; left: prize; right: 3,3 and 3,4
        // The pawn on 4,2 is blocked by the rook and has nothing to capture.
        assert_eq!(moves, ["3222", "3212", "3231", "3233", "3234"]);
    }

    #[test]
    fn test_king_moves() {
        let mut board = Board::empty();
        place(&mut board, 6, 2, Color::White, Kind::King);
        place(&mut board, 6, 1, Color::White, Kind::Rook);
        place(&mut board, 6, 3, Color::Black, Kind::Rook);
        let moves: Vec<String> = generate_moves(&board, Color::White)
            .into_iter()
            .filter(|m| m.from() == (6, 2))
            .map(|m| m.to_string())
            .collect();
        assert_eq!(moves, ["6252", "6263"]);
    }
}
