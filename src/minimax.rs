//! Fixed-depth minimax search, with and without alpha-beta pruning.
//!
//! Both searches work on a single private [`Position`]. Each move is played
//! on it, searched, and undone by restoring the checkpoint taken just
//! before, so no board copy outlives one loop iteration.
//!
//! White is the maximizing side and Black the minimizing side. Leaf values
//! are always measured from White's point of view so that both sides
//! optimise the same quantity.

use log::debug;

use crate::board::Color;
use crate::constants::INFINITY;
use crate::eval::evaluate_score;
use crate::moves::{generate_moves, Move};
use crate::position::{play_move, Position};

/// Result of a search: the chosen move and its backed-up value.
///
/// `mv` is `None` for leaves (terminal position or depth exhausted) and for
/// interior nodes where the side to move had no move at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub mv: Option<Move>,
    pub value: i32,
}

impl SearchNode {
    fn leaf(value: i32) -> Self {
        Self { mv: None, value }
    }
}

/// Minimax searcher owning the working position.
pub struct Minimax {
    pos: Position,
    nodes: u64,
}

impl Minimax {
    /// Create a searcher over a private copy of `pos`.
    pub fn new(pos: &Position) -> Self {
        Self {
            pos: *pos,
            nodes: 0,
        }
    }

    /// Number of nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The working position. Between searches it equals the starting position.
    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Plain minimax to `depth` plies with `color` to move.
    ///
    /// Values are always White's material-plus-score lead, whichever color
    /// is to move: White maximizes it and Black minimizes it. A Black caller
    /// wanting its own perspective must negate the value.
    pub fn minimax(&mut self, depth: u32, color: Color) -> SearchNode {
        self.nodes += 1;
        if depth == 0 || self.pos.game_over() {
            return SearchNode::leaf(evaluate_score(&self.pos, Color::White));
        }

        let maximizing = color == Color::White;
        let mut best = SearchNode::leaf(if maximizing { -INFINITY } else { INFINITY });

        for mv in generate_moves(&self.pos.board, color) {
            let saved = self.pos.checkpoint();
            play_move(&mut self.pos, mv, color);
            let child = self.minimax(depth - 1, color.opponent());
            self.pos.restore(saved);

            if best.mv.is_none() || improves(maximizing, child.value, best.value) {
                best = SearchNode {
                    mv: Some(mv),
                    value: child.value,
                };
            }
        }

        best
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `a` is the value the maximizer is already guaranteed and `b` the value
    /// the minimizer is already guaranteed; call with `-INFINITY, INFINITY`
    /// at the root. The root value and move match [`Minimax::minimax`].
    pub fn alpha_beta(&mut self, depth: u32, color: Color, mut a: i32, mut b: i32) -> SearchNode {
        self.nodes += 1;
        if depth == 0 || self.pos.game_over() {
            return SearchNode::leaf(evaluate_score(&self.pos, Color::White));
        }

        let maximizing = color == Color::White;
        let mut best = SearchNode::leaf(if maximizing { -INFINITY } else { INFINITY });

        for mv in generate_moves(&self.pos.board, color) {
            let saved = self.pos.checkpoint();
            play_move(&mut self.pos, mv, color);
            let child = self.alpha_beta(depth - 1, color.opponent(), a, b);
            self.pos.restore(saved);

            if best.mv.is_none() || improves(maximizing, child.value, best.value) {
                best = SearchNode {
                    mv: Some(mv),
                    value: child.value,
                };
            }

            if maximizing {
                a = a.max(child.value);
            } else {
                b = b.min(child.value);
            }
            if b <= a {
                break;
            }
        }

        best
    }
}

/// Strict comparison so the first-seen move wins ties.
#[inline]
fn improves(maximizing: bool, value: i32, best: i32) -> bool {
    if maximizing { value > best } else { value < best }
}

/// Run plain minimax from `pos` and log a summary.
pub fn search_minimax(pos: &Position, depth: u32, color: Color) -> SearchNode {
    let mut searcher = Minimax::new(pos);
    let node = searcher.minimax(depth, color);
    debug!(
        "minimax depth={depth} color={color} nodes={} value={} move={:?}",
        searcher.nodes(),
        node.value,
        node.mv.map(|m| m.to_string())
    );
    node
}

/// Run alpha-beta from `pos` with a full window and log a summary.
pub fn search_alpha_beta(pos: &Position, depth: u32, color: Color) -> SearchNode {
    let mut searcher = Minimax::new(pos);
    let node = searcher.alpha_beta(depth, color, -INFINITY, INFINITY);
    debug!(
        "alpha-beta depth={depth} color={color} nodes={} value={} move={:?}",
        searcher.nodes(),
        node.value,
        node.mv.map(|m| m.to_string())
    );
    node
}
