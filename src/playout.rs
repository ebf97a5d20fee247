//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random pseudo-legal moves on a private copy of
//! the position until the game ends or the side to move is stuck, then
//! scores the final position for the searching agent.

use fastrand::Rng;

use crate::board::Color;
use crate::constants::MAX_ROLLOUT_PLIES;
use crate::eval::rollout_reward;
use crate::moves::generate_moves;
use crate::position::{play_move, Position};

/// Perform a random playout from `pos` with `color` to move.
///
/// Returns the three-valued reward from `agent`'s perspective. The input
/// position is never modified.
pub fn rollout(pos: &Position, color: Color, agent: Color, rng: &mut Rng) -> i32 {
    let mut work = *pos;
    let mut to_move = color;
    let mut plies = 0;

    while !work.game_over() && plies < MAX_ROLLOUT_PLIES {
        let moves = generate_moves(&work.board, to_move);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.usize(..moves.len())];
        play_move(&mut work, mv, to_move);
        to_move = to_move.opponent();
        plies += 1;
    }

    rollout_reward(&work, agent)
}
