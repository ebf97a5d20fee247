//! Search entry point shared by the match driver and the command line.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use fastrand::Rng;
use log::info;

use crate::board::{Board, Color};
use crate::constants::{ALPHABETA_DEPTH, MCTS_TIME_BUDGET, MINIMAX_DEPTH};
use crate::error::{EngineError, Result};
use crate::mcts::{dump_children, tree_search, SearchLimit, Tree};
use crate::minimax::{search_alpha_beta, search_minimax};
use crate::moves::{generate_moves, Move};
use crate::position::{Position, Scores};

/// Which search decides the move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    Minimax,
    #[default]
    AlphaBeta,
    Mcts,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Mcts => "mcts",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "ab" => Ok(Strategy::AlphaBeta),
            "mcts" => Ok(Strategy::Mcts),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Runtime engine settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub strategy: Strategy,
    /// Plies searched by plain minimax
    pub minimax_depth: u32,
    /// Plies searched by alpha-beta
    pub alphabeta_depth: u32,
    /// MCTS search limit
    pub mcts_limit: SearchLimit,
    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            minimax_depth: MINIMAX_DEPTH,
            alphabeta_depth: ALPHABETA_DEPTH,
            mcts_limit: SearchLimit::Time(MCTS_TIME_BUDGET),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.mcts_limit = SearchLimit::Time(budget);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Move selector. Holds the configuration and the random source; every
/// call searches from scratch on its own copy of the inputs.
pub struct Engine {
    config: EngineConfig,
    rng: Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.config.strategy = strategy;
    }

    /// Choose a move for `color` on `board`, given the running match scores.
    ///
    /// The inputs are copied before searching. Fails with
    /// [`EngineError::GameOver`] on a finished game and
    /// [`EngineError::NoLegalMoves`] when `color` cannot move.
    pub fn select_best_move(&mut self, board: &Board, scores: Scores, color: Color) -> Result<Move> {
        let pos = Position::new(*board, scores);
        if pos.game_over() {
            return Err(EngineError::GameOver);
        }
        if generate_moves(&pos.board, color).is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let mv = match self.config.strategy {
            Strategy::Minimax => search_minimax(&pos, self.config.minimax_depth, color).mv,
            Strategy::AlphaBeta => search_alpha_beta(&pos, self.config.alphabeta_depth, color).mv,
            Strategy::Mcts => {
                let mut tree = Tree::new(&pos, color);
                let mv = tree_search(&mut tree, self.config.mcts_limit, &mut self.rng);
                dump_children(&tree);
                mv
            }
        };

        let mv = mv.ok_or(EngineError::NoLegalMoves)?;
        info!("{} plays {mv} for {color}", self.config.strategy);
        Ok(mv)
    }
}
