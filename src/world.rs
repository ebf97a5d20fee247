//! Match state: the authoritative board, running scores and turn order.
//!
//! The engine never touches a `World` directly. The driver hands it a copy
//! of the board and scores, gets a move back, and applies it here.

use crate::board::{Board, Cell, Color};
use crate::constants::{COLS, ROWS};
use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::moves::{generate_moves, Move};
use crate::position::{play_move, Position, Scores};

pub struct World {
    pos: Position,
    to_move: Color,
    /// Moves chosen by the engine
    turns: u64,
    /// Sum of the branching factors seen at those moves
    branches: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// A new game on the standard layout with White to move.
    pub fn new() -> Self {
        Self::with_board(Board::initial(), Color::White)
    }

    pub fn with_board(board: Board, to_move: Color) -> Self {
        Self {
            pos: Position::new(board, Scores::default()),
            to_move,
            turns: 0,
            branches: 0,
        }
    }

    /// Back to the standard layout with White to move; statistics are kept.
    pub fn reset(&mut self) {
        self.pos = Position::new(Board::initial(), Scores::default());
        self.to_move = Color::White;
    }

    pub fn board(&self) -> &Board {
        &self.pos.board
    }

    pub fn scores(&self) -> Scores {
        self.pos.scores
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn set_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    pub fn game_over(&self) -> bool {
        self.pos.game_over()
    }

    /// Pseudo-legal moves for the side to move.
    pub fn available_moves(&self) -> Vec<Move> {
        generate_moves(&self.pos.board, self.to_move)
    }

    /// Play `mv` for the side to move, update the scores and pass the turn.
    ///
    /// `prize` places a new prize on `(row, col)` once the move has been
    /// played. The square must be on the board and empty after the move;
    /// otherwise nothing changes and [`EngineError::InvalidPrize`] is returned.
    pub fn apply_move(&mut self, mv: Move, prize: Option<(usize, usize)>) -> Result<()> {
        if self.game_over() {
            return Err(EngineError::GameOver);
        }
        if !self.available_moves().contains(&mv) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }

        let mut next = self.pos;
        play_move(&mut next, mv, self.to_move);
        if let Some((row, col)) = prize {
            if row >= ROWS || col >= COLS || next.board.get(row, col) != Cell::Empty {
                return Err(EngineError::InvalidPrize(format!("{row}{col}")));
            }
            next.board.set(row, col, Cell::Prize);
        }

        self.pos = next;
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Ask `engine` for a move for the side to move, without playing it.
    pub fn select_action(&mut self, engine: &mut Engine) -> Result<Move> {
        let moves = self.available_moves();
        self.turns += 1;
        self.branches += moves.len() as u64;
        engine.select_best_move(&self.pos.board, self.pos.scores, self.to_move)
    }

    /// Average number of moves available at the positions the engine was asked about.
    pub fn avg_branching_factor(&self) -> f64 {
        if self.turns == 0 {
            return 0.0;
        }
        self.branches as f64 / self.turns as f64
    }
}
