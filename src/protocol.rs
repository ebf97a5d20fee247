//! Line-oriented text protocol for driving the engine from another program.
//!
//! The framing follows GTP: each command may carry a numeric id, and each
//! response is `=<id> <text>` on success or `?<id> <text>` on failure,
//! followed by an empty line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Reset to the starting layout, White to move
//! - `showboard` - Print the board
//! - `strategy <minimax|alphabeta|mcts>` - Switch search strategy
//! - `color <white|black>` - Set the side to move
//! - `play <move> [<row><col>]` - Play a four-digit move token for the side
//!   to move, optionally dropping a new prize on the given square
//! - `genmove` - Search, play and print a move for the side to move
//! - `score` - Print the running scores
//!
//! ## Example
//!
//! ```ignore
//! use prize_chess::engine::Engine;
//! use prize_chess::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(Engine::default());
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use log::{info, warn};

use crate::board::Color;
use crate::engine::{Engine, Strategy};
use crate::error::{EngineError, Result};
use crate::moves::Move;
use crate::world::World;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "color",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "strategy",
    "version",
];

/// Protocol front end: a match plus the engine that plays it.
pub struct ProtocolEngine {
    world: World,
    engine: Engine,
}

impl ProtocolEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            world: World::new(),
            engine,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.world.reset();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.world.board())),

            "score" => {
                let scores = self.world.scores();
                (true, format!("white {} black {}", scores.white, scores.black))
            }

            "strategy" => match args.first().map(|s| s.parse::<Strategy>()) {
                Some(Ok(strategy)) => {
                    self.engine.set_strategy(strategy);
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (true, self.engine.config().strategy.to_string()),
            },

            "color" => match args.first().map(|s| s.parse::<Color>()) {
                Some(Ok(color)) => {
                    self.world.set_to_move(color);
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (true, self.world.to_move().to_string()),
            },

            "play" => {
                let Some(token) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let result = token.parse::<Move>().and_then(|mv| {
                    let prize = args.get(1).copied().map(parse_square).transpose()?;
                    self.world.apply_move(mv, prize)
                });
                match result {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let result = self
                    .world
                    .select_action(&mut self.engine)
                    .and_then(|mv| self.world.apply_move(mv, None).map(|()| mv));
                match result {
                    Ok(mv) => {
                        info!(
                            "genmove {mv}, average branching factor {:.2}",
                            self.world.avg_branching_factor()
                        );
                        (true, mv.to_string())
                    }
                    Err(e) => {
                        warn!("genmove failed: {e}");
                        (false, e.to_string())
                    }
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

/// Parse a two-digit `<row><col>` square.
fn parse_square(s: &str) -> Result<(usize, usize)> {
    let invalid = || EngineError::InvalidPrize(s.to_string());
    let mut digits = s.chars().map(|c| c.to_digit(10).map(|d| d as usize));
    match (digits.next(), digits.next(), digits.next()) {
        (Some(Some(row)), Some(Some(col)), None) => Ok((row, col)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::engine::EngineConfig;
    use crate::position::Scores;

    fn engine() -> ProtocolEngine {
        let mut config = EngineConfig::with_strategy(Strategy::Minimax);
        config.minimax_depth = 1;
        ProtocolEngine::new(Engine::new(config))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["genmove"]), (true, "true".to_string()));
        assert_eq!(engine.execute("known_command", &["undo"]), (true, "false".to_string()));
        assert!(!engine.execute("known_command", &[]).0);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();
        assert!(engine.execute("play", &["5040"]).0);
        assert_eq!(engine.world().to_move(), Color::Black);
        assert!(!engine.execute("play", &["5040"]).0);
        assert!(!engine.execute("play", &["99"]).0);

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.world().to_move(), Color::White);
        assert_eq!(engine.world().scores(), Scores::default());
    }

    #[test]
    fn test_play_with_prize() {
        let mut engine = engine();
        assert!(engine.execute("play", &["5040", "50"]).0);
        assert_eq!(engine.world().board().get(5, 0), Cell::Prize);

        // Occupied, off-board and malformed squares are refused.
        for square in ["20", "09", "x1", "123"] {
            let (ok, msg) = engine.execute("play", &["1020", square]);
            assert!(!ok, "{square}");
            assert!(msg.starts_with("invalid prize square"), "{msg}");
        }
        assert_eq!(engine.world().to_move(), Color::Black);
        assert!(engine.execute("play", &["1020"]).0);
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("34"), Ok((3, 4)));
        assert!(parse_square("3").is_err());
        assert!(parse_square("3a").is_err());
    }

    #[test]
    fn test_strategy_switch() {
        let mut engine = engine();
        assert!(engine.execute("strategy", &["mcts"]).0);
        assert_eq!(engine.execute("strategy", &[]), (true, "mcts".to_string()));
        assert!(!engine.execute("strategy", &["random"]).0);
    }

    #[test]
    fn test_run_session() {
        let mut engine = engine();
        let input = b"1 name\n# comment\n\n2 genmove\nscore\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("=1 prize-chess\n\n"));
        assert!(text.contains("=2 5"));
        assert!(text.contains("= white 1 black 0"));
        // Nothing after quit.
        assert_eq!(text.matches("prize-chess").count(), 1);
    }
}
