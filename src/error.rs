//! Error type shared by the engine and the driver.

/// Errors raised by board parsing, move parsing and the search entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A move token was not four in-range digits.
    #[error("invalid move format: {0:?}")]
    InvalidMoveFormat(String),

    /// A board description could not be parsed.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// A well-formed move that the side to move cannot play.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A prize square off the board or not empty after the move.
    #[error("invalid prize square: {0}")]
    InvalidPrize(String),

    /// A strategy name that is not `minimax`, `alphabeta` or `mcts`.
    #[error("unknown strategy {0:?}")]
    UnknownStrategy(String),

    /// The side to move has no pseudo-legal move.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// Search was requested on a finished game.
    #[error("game is already over")]
    GameOver,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
