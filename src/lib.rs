//! Prize-chess: a game-tree search engine for a 7x5 chess variant.
//!
//! The variant has pawns, rooks limited to three squares, kings and a row
//! of neutral prize squares. A move is chosen either by fixed-depth
//! minimax (optionally with alpha-beta pruning) or by time-bounded Monte
//! Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, piece values and search parameters
//! - [`board`] - Board model and terminal test
//! - [`moves`] - Move tokens and move generation
//! - [`position`] - Working position and move execution
//! - [`eval`] - Static evaluation and rollout reward
//! - [`minimax`] - Minimax and alpha-beta
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`playout`] - Random game simulation for MCTS
//! - [`engine`] - Strategy selection and the search entry point
//! - [`world`] - Authoritative match state
//! - [`protocol`] - Text protocol front end
//!
//! ## Example
//!
//! ```
//! use prize_chess::board::{Board, Color};
//! use prize_chess::engine::{Engine, EngineConfig, Strategy};
//! use prize_chess::position::Scores;
//!
//! let mut config = EngineConfig::with_strategy(Strategy::AlphaBeta);
//! config.alphabeta_depth = 3;
//! let mut engine = Engine::new(config);
//!
//! let mv = engine
//!     .select_best_move(&Board::initial(), Scores::default(), Color::White)
//!     .unwrap();
//! println!("Best move: {mv}");
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod eval;
pub mod mcts;
pub mod minimax;
pub mod moves;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod world;

pub use error::{EngineError, Result};
