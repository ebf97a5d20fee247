//! Board model: a fixed 7x5 grid of empty cells, prizes and pieces.
//!
//! Boards are small `Copy` values. Search code snapshots them freely and
//! restores a snapshot to undo a move.

use std::fmt;
use std::str::FromStr;

use crate::constants::{COLS, KING_VALUE, PAWN_VALUE, PRIZE_ROW, ROOK_VALUE, ROWS};
use crate::error::EngineError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Moves toward row 0. Maximizing side in minimax.
    White,
    /// Moves toward row 6. Minimizing side in minimax.
    Black,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    #[inline]
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The opponent's back rank, where this color's pawns leave the board.
    #[inline]
    pub fn last_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => ROWS - 1,
        }
    }

    fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" | "0" => Ok(Color::White),
            "black" | "b" | "1" => Ok(Color::Black),
            _ => Err(EngineError::InvalidBoard(format!("unknown color {s:?}"))),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    Rook,
    King,
}

impl Kind {
    /// Material value of the piece kind.
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            Kind::Pawn => PAWN_VALUE,
            Kind::Rook => ROOK_VALUE,
            Kind::King => KING_VALUE,
        }
    }

    fn code(self) -> char {
        match self {
            Kind::Pawn => 'P',
            Kind::Rook => 'R',
            Kind::King => 'K',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    pub const fn new(color: Color, kind: Kind) -> Self {
        Self { color, kind }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Neutral square credited to whoever lands on it.
    Prize,
    Piece(Piece),
}

impl Cell {
    #[inline]
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Piece(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        matches!(self, Cell::Piece(p) if p.color == color)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "--"),
            Cell::Prize => write!(f, "P "),
            Cell::Piece(p) => write!(f, "{}{}", p.color.code(), p.kind.code()),
        }
    }
}

impl FromStr for Cell {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cell = match s.trim() {
            "" | "--" | "." => Cell::Empty,
            "P" | "PZ" => Cell::Prize,
            code => {
                let mut chars = code.chars();
                let color = match chars.next() {
                    Some('W') => Color::White,
                    Some('B') => Color::Black,
                    _ => return Err(EngineError::InvalidBoard(format!("bad cell {code:?}"))),
                };
                let kind = match (chars.next(), chars.next()) {
                    (Some('P'), None) => Kind::Pawn,
                    (Some('R'), None) => Kind::Rook,
                    (Some('K'), None) => Kind::King,
                    _ => return Err(EngineError::InvalidBoard(format!("bad cell {code:?}"))),
                };
                Cell::Piece(Piece::new(color, kind))
            }
        };
        Ok(cell)
    }
}

/// A 7x5 grid indexed `[row][col]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// The starting layout: seven pawns, two rooks and a king per side,
    /// with a row of prizes in the middle.
    ///
    /// ```text
    /// BP|BR|BK|BR|BP
    /// BP|BP|BP|BP|BP
    /// --|--|--|--|--
    /// P |P |P |P |P
    /// --|--|--|--|--
    /// WP|WP|WP|WP|WP
    /// WP|WR|WK|WR|WP
    /// ```
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (color, back, front) in [(Color::Black, 0, 1), (Color::White, ROWS - 1, ROWS - 2)] {
            for col in 0..COLS {
                board.set(front, col, Cell::Piece(Piece::new(color, Kind::Pawn)));
            }
            board.set(back, 0, Cell::Piece(Piece::new(color, Kind::Pawn)));
            board.set(back, COLS - 1, Cell::Piece(Piece::new(color, Kind::Pawn)));
            board.set(back, 1, Cell::Piece(Piece::new(color, Kind::Rook)));
            board.set(back, COLS - 2, Cell::Piece(Piece::new(color, Kind::Rook)));
            board.set(back, COLS / 2, Cell::Piece(Piece::new(color, Kind::King)));
        }
        for col in 0..COLS {
            board.set(PRIZE_ROW, col, Cell::Prize);
        }
        board
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Iterate over `(row, col, piece)` for every piece on the board, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.piece().map(|p| (row, col, p)))
        })
    }

    /// Number of pieces of the given color and kind.
    pub fn count(&self, color: Color, kind: Kind) -> usize {
        self.pieces()
            .filter(|(_, _, p)| p.color == color && p.kind == kind)
            .count()
    }

    /// Sum of the material values of every piece of `color` on the board.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces()
            .filter(|(_, _, p)| p.color == color)
            .map(|(_, _, p)| p.kind.value())
            .sum()
    }

    /// A game ends when a king is gone, or when neither side has any
    /// piece other than its king.
    pub fn game_over(&self) -> bool {
        let mut kings = [0usize; 2];
        let mut others = [0usize; 2];
        for (_, _, p) in self.pieces() {
            let side = match p.color {
                Color::White => 0,
                Color::Black => 1,
            };
            if p.kind == Kind::King {
                kings[side] += 1;
            } else {
                others[side] += 1;
            }
        }
        kings[0] == 0 || kings[1] == 0 || (others[0] == 0 && others[1] == 0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            let row: Vec<String> = line.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", row.join("|"))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse the format produced by `Display`: one line per row, cells
    /// separated by `|` (or by whitespace when no `|` is present).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() != ROWS {
            return Err(EngineError::InvalidBoard(format!(
                "expected {ROWS} rows, got {}",
                lines.len()
            )));
        }

        let mut board = Board::empty();
        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<&str> = if line.contains('|') {
                line.split('|').collect()
            } else {
                line.split_whitespace().collect()
            };
            if cells.len() != COLS {
                return Err(EngineError::InvalidBoard(format!(
                    "row {row}: expected {COLS} cells, got {}",
                    cells.len()
                )));
            }
            for (col, code) in cells.iter().enumerate() {
                board.set(row, col, code.parse()?);
            }
        }
        Ok(board)
    }
}
