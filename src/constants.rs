//! Constants for board dimensions, piece values, and search parameters.
//!
//! This module contains all the compile-time configuration of the engine.
//! Runtime overrides (strategy, depth, time budget, seed) live in
//! [`crate::engine::EngineConfig`] and are exposed on the command line.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows. Row 0 is Black's back rank, row 6 is White's.
pub const ROWS: usize = 7;

/// Number of columns.
pub const COLS: usize = 5;

/// Row holding the prize squares at the start of a game.
pub const PRIZE_ROW: usize = ROWS / 2;

/// Maximum number of cells a rook slides in one direction.
pub const ROOK_RANGE: usize = 3;

// =============================================================================
// Material Values
// =============================================================================

/// Value of a pawn (also credited for collecting a prize or reaching the last row).
pub const PAWN_VALUE: i32 = 1;

/// Value of a rook.
pub const ROOK_VALUE: i32 = 3;

/// Value of a king.
pub const KING_VALUE: i32 = 8;

/// Bonus credited when a pawn leaves the board through the opponent's back rank.
pub const LAST_ROW_BONUS: i32 = 1;

/// Bonus credited when a piece lands on a prize square.
pub const PRIZE_BONUS: i32 = 1;

// =============================================================================
// Minimax Parameters
// =============================================================================

/// Sentinel bound used for alpha-beta windows and unvisited UCT values.
pub const INFINITY: i32 = 1_000_000;

/// Default depth (plies) for plain minimax.
pub const MINIMAX_DEPTH: u32 = 5;

/// Default depth (plies) for alpha-beta; pruning affords two more plies.
pub const ALPHABETA_DEPTH: u32 = 7;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default wall-clock budget for one MCTS call.
pub const MCTS_TIME_BUDGET: Duration = Duration::from_secs(2);

/// UCT exploration constant.
pub const UCT_C: f64 = 1.41;

/// Playouts stop after this many plies even if the game is not over.
pub const MAX_ROLLOUT_PLIES: usize = 1000;

/// Number of iterations between trace reports.
pub const REPORT_PERIOD: usize = 500;

// =============================================================================
// Rollout Rewards
// =============================================================================

/// Reward when the agent ends the rollout exactly level.
pub const REWARD_DRAW: i32 = 0;

/// Reward when the agent ends the rollout ahead.
pub const REWARD_WIN: i32 = 1;

/// Reward when the agent ends the rollout behind. Losses weigh three times a win.
pub const REWARD_LOSS: i32 = -3;
