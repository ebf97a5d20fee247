//! Prize-chess command line.
//!
//! ## Usage
//!
//! - `prize-chess` - Play one engine-vs-engine game and print it
//! - `prize-chess protocol` - Start the text protocol on stdin/stdout
//! - `prize-chess bestmove --board FILE --color white` - Search one position

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use log::info;

use prize_chess::board::{Board, Color};
use prize_chess::engine::{Engine, EngineConfig, Strategy};
use prize_chess::mcts::SearchLimit;
use prize_chess::position::Scores;
use prize_chess::protocol::ProtocolEngine;
use prize_chess::world::World;
use prize_chess::EngineError;

/// Prize-chess: minimax and MCTS search for a 7x5 chess variant
#[derive(Parser)]
#[command(name = "prize-chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search strategy: minimax, alphabeta or mcts
    #[arg(long, global = true, default_value = "alphabeta")]
    strategy: Strategy,

    /// Search depth in plies (minimax and alpha-beta)
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// MCTS time budget in milliseconds
    #[arg(long, global = true)]
    time_ms: Option<u64>,

    /// Seed for the random source
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server on stdin/stdout
    Protocol,
    /// Let the engine play both sides of one game
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value_t = 200)]
        max_moves: usize,
    },
    /// Print the best move for a board read from a file (or stdin with `-`)
    Bestmove {
        #[arg(long)]
        board: PathBuf,
        #[arg(long, default_value = "white")]
        color: Color,
        #[arg(long, default_value_t = 0)]
        white_score: i32,
        #[arg(long, default_value_t = 0)]
        black_score: i32,
    },
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::with_strategy(self.strategy);
        if let Some(depth) = self.depth {
            config.minimax_depth = depth;
            config.alphabeta_depth = depth;
        }
        if let Some(ms) = self.time_ms {
            config.mcts_limit = SearchLimit::Time(Duration::from_millis(ms));
        }
        config.seed = self.seed;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str(&cli.log_level)
        .context("invalid log specification")?
        .start()
        .context("failed to start logger")?;

    let engine = Engine::new(cli.engine_config());

    match cli.command {
        Some(Commands::Protocol) => {
            let mut server = ProtocolEngine::new(engine);
            server.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Bestmove {
            ref board,
            color,
            white_score,
            black_score,
        }) => {
            let text = if board.as_os_str() == "-" {
                io::read_to_string(io::stdin()).context("failed to read board from stdin")?
            } else {
                std::fs::read_to_string(board)
                    .with_context(|| format!("failed to read {}", board.display()))?
            };
            let board: Board = text.parse()?;
            let mut engine = engine;
            let mv = engine.select_best_move(&board, Scores::new(white_score, black_score), color)?;
            println!("{mv}");
        }
        Some(Commands::Selfplay { max_moves }) => run_selfplay(engine, max_moves)?,
        None => run_selfplay(engine, 200)?,
    }

    Ok(())
}

fn run_selfplay(mut engine: Engine, max_moves: usize) -> Result<()> {
    let mut world = World::new();
    println!("{}", world.board());

    for n in 1..=max_moves {
        if world.game_over() {
            break;
        }
        let mv = match world.select_action(&mut engine) {
            Ok(mv) => mv,
            Err(EngineError::NoLegalMoves) => {
                println!("{} has no moves", world.to_move());
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let color = world.to_move();
        world.apply_move(mv, None)?;
        println!("{n}. {color} {mv}\n{}", world.board());
    }

    let scores = world.scores();
    println!("Final score: white {} black {}", scores.white, scores.black);
    info!(
        "average branching factor {:.2}",
        world.avg_branching_factor()
    );
    Ok(())
}
