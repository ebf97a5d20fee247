//! Static evaluation.
//!
//! Both strategies score positions by material: pieces still on the board
//! plus whatever each side has been credited by the moves played so far.

use crate::board::Color;
use crate::constants::{REWARD_DRAW, REWARD_LOSS, REWARD_WIN};
use crate::position::Position;

/// Material balance from `color`'s point of view.
///
/// `(on-board material + accumulated score)` of `color` minus the same
/// quantity for the opponent, so `evaluate_score(p, White) ==
/// -evaluate_score(p, Black)` for every position.
pub fn evaluate_score(pos: &Position, color: Color) -> i32 {
    let side = |c: Color| pos.board.material(c) + pos.scores.get(c);
    side(color) - side(color.opponent())
}

/// Three-valued rollout reward for `agent`: level, ahead or behind.
///
/// Losses are weighted more heavily than wins, which makes MCTS prefer
/// lines where the agent is rarely behind.
pub fn rollout_reward(pos: &Position, agent: Color) -> i32 {
    match evaluate_score(pos, agent) {
        0 => REWARD_DRAW,
        d if d > 0 => REWARD_WIN,
        _ => REWARD_LOSS,
    }
}
