//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each iteration runs four phases on one tree rooted at the current
//! position:
//! - selection: descend by maximum UCT value until a node without children
//! - expansion: add one child per legal move, then pick one at random
//! - rollout: random self-play from that child (see [`crate::playout`])
//! - backpropagation: add the reward and one visit to every node up to the root
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by index.
//! A child keeps its parent's index only to walk back up during
//! backpropagation; the whole arena is dropped when the search returns.
//!
//! Rewards are always measured from the searching agent's point of view,
//! at every depth.

use std::time::{Duration, Instant};

use fastrand::Rng;
use log::{debug, trace};

use crate::board::Color;
use crate::constants::{INFINITY, REPORT_PERIOD, UCT_C};
use crate::moves::{generate_moves, Move};
use crate::playout::rollout;
use crate::position::{play_move, Position};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Per-node search state.
#[derive(Clone, Debug)]
pub struct State {
    /// Position reached at this node
    pub position: Position,
    /// Side to move at this node
    pub color: Color,
    /// Move that produced this node (`None` at the root)
    pub mv: Option<Move>,
    /// Number of rollouts through this node
    pub visits: u32,
    /// Sum of the rewards of those rollouts
    pub cost: i64,
}

/// A node in the MCTS search tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub state: State,
    /// Back-reference for backpropagation. `None` only for the root.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// When to stop searching.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchLimit {
    /// Stop once this much wall-clock time has elapsed.
    Time(Duration),
    /// Run exactly this many iterations. Deterministic under a seeded `Rng`.
    Iterations(usize),
}

/// UCT value of a child with `visits` visits and accumulated `cost`, where
/// `total` is the number of completed iterations.
///
/// Unvisited children get [`INFINITY`] so they are always tried first.
pub fn uct_value(visits: u32, cost: i64, total: u32) -> f64 {
    if visits == 0 {
        return INFINITY as f64;
    }
    let v = visits as f64;
    cost as f64 / v + UCT_C * ((total as f64).ln() / v).sqrt()
}

/// Search tree for one call of the engine.
pub struct Tree {
    nodes: Vec<Node>,
    agent: Color,
}

impl Tree {
    /// Create a tree whose root is `pos` with `color` to move. `color` is also
    /// the agent the rewards are computed for.
    pub fn new(pos: &Position, color: Color) -> Self {
        let root = Node {
            state: State {
                position: *pos,
                color,
                mv: None,
                visits: 0,
                cost: 0,
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            agent: color,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is created with the tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of completed iterations, i.e. the root's visit count.
    pub fn total_visits(&self) -> u32 {
        self.nodes[self.root()].state.visits
    }

    /// Descend from the root to a leaf, taking the child with the highest
    /// UCT value at every step (first one on ties).
    pub fn select(&self) -> NodeId {
        let total = self.total_visits();
        let mut id = self.root();
        while !self.nodes[id].is_leaf() {
            let mut best = f64::NEG_INFINITY;
            let mut next = id;
            for &child in &self.nodes[id].children {
                let s = &self.nodes[child].state;
                let uct = uct_value(s.visits, s.cost, total);
                if uct > best {
                    best = uct;
                    next = child;
                }
            }
            id = next;
        }
        id
    }

    /// Expand `leaf` with one child per legal move and return one of them at
    /// random. Terminal or stuck positions are not expanded; `leaf` itself is
    /// returned instead.
    pub fn expand(&mut self, leaf: NodeId, rng: &mut Rng) -> NodeId {
        let state = &self.nodes[leaf].state;
        let color = state.color;
        let mut work = state.position;
        if work.game_over() {
            return leaf;
        }
        let moves = generate_moves(&work.board, color);
        if moves.is_empty() {
            return leaf;
        }

        for mv in moves {
            let saved = work.checkpoint();
            play_move(&mut work, mv, color);
            let id = self.nodes.len();
            self.nodes.push(Node {
                state: State {
                    position: work,
                    color: color.opponent(),
                    mv: Some(mv),
                    visits: 0,
                    cost: 0,
                },
                parent: Some(leaf),
                children: Vec::new(),
            });
            self.nodes[leaf].children.push(id);
            work.restore(saved);
        }

        let children = &self.nodes[leaf].children;
        children[rng.usize(..children.len())]
    }

    /// Random playout from `id`. The tree is not modified.
    pub fn simulate(&self, id: NodeId, rng: &mut Rng) -> i32 {
        let state = &self.nodes[id].state;
        rollout(&state.position, state.color, self.agent, rng)
    }

    /// Add `reward` and one visit to `from` and every ancestor.
    pub fn backpropagate(&mut self, from: NodeId, reward: i32) {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let node = &mut self.nodes[id];
            node.state.cost += i64::from(reward);
            node.state.visits += 1;
            cur = node.parent;
        }
    }

    /// One full select / expand / rollout / backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut Rng) {
        let leaf = self.select();
        let node = self.expand(leaf, rng);
        let reward = self.simulate(node, rng);
        self.backpropagate(node, reward);
    }

    /// The root child with the greatest accumulated cost (first one on ties).
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<&State> = None;
        for &child in &self.nodes[self.root()].children {
            let s = &self.nodes[child].state;
            if best.is_none_or(|b| s.cost > b.cost) {
                best = Some(s);
            }
        }
        best.and_then(|s| s.mv)
    }
}

/// Run MCTS on `tree` until `limit` is reached and return the best move.
///
/// The root is expanded up front so a move is available even when the limit
/// allows no iteration at all. Returns `None` only when the root position
/// has no move.
pub fn tree_search(tree: &mut Tree, limit: SearchLimit, rng: &mut Rng) -> Option<Move> {
    let root = tree.root();
    if tree.node(root).is_leaf() {
        tree.expand(root, rng);
    }

    let start = Instant::now();
    let mut iterations = 0usize;
    loop {
        let done = match limit {
            SearchLimit::Time(budget) => start.elapsed() >= budget,
            SearchLimit::Iterations(n) => iterations >= n,
        };
        if done {
            break;
        }

        tree.iterate(rng);
        iterations += 1;

        if iterations % REPORT_PERIOD == 0 {
            trace!(
                "mcts: {iterations} iterations, {} nodes, {:?} elapsed",
                tree.len(),
                start.elapsed()
            );
        }
    }

    let best = tree.best_move();
    debug!(
        "mcts: {iterations} iterations, {} nodes, best={:?}",
        tree.len(),
        best.map(|m| m.to_string())
    );
    best
}

/// Log the statistics of the root's children.
pub fn dump_children(tree: &Tree) {
    for &child in &tree.node(tree.root()).children {
        let s = &tree.node(child).state;
        debug!(
            "move {} visits={} cost={}",
            s.mv.map(|m| m.to_string()).unwrap_or_default(),
            s.visits,
            s.cost
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Cell, Kind, Piece};
    use crate::position::Scores;

    fn initial() -> Position {
        Position::new(Board::initial(), Scores::default())
    }

    #[test]
    fn test_uct_unvisited_is_max() {
        assert_eq!(uct_value(0, -50, 10), INFINITY as f64);
        assert!(uct_value(1, 1, 1) < INFINITY as f64);
    }

    #[test]
    fn test_uct_formula() {
        let v = uct_value(4, 2, 16);
        let expected = 0.5 + UCT_C * ((16f64).ln() / 4.0).sqrt();
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn test_expand_adds_one_child_per_move() {
        let pos = initial();
        let mut tree = Tree::new(&pos, Color::White);
        let mut rng = Rng::with_seed(5);
        let picked = tree.expand(tree.root(), &mut rng);
        let n_moves = generate_moves(&pos.board, Color::White).len();
        assert_eq!(tree.node(tree.root()).children.len(), n_moves);
        assert_eq!(tree.len(), n_moves + 1);
        assert_eq!(tree.node(picked).parent, Some(tree.root()));
        assert_eq!(tree.node(picked).state.color, Color::Black);
        // Root position untouched.
        assert_eq!(tree.node(tree.root()).state.position, pos);
    }

    #[test]
    fn test_expand_terminal_returns_leaf() {
        let mut board = Board::empty();
        board.set(6, 2, Cell::Piece(Piece::new(Color::White, Kind::King)));
        let pos = Position::new(board, Scores::default());
        let mut tree = Tree::new(&pos, Color::White);
        let mut rng = Rng::with_seed(5);
        assert_eq!(tree.expand(tree.root(), &mut rng), tree.root());
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_select_prefers_unvisited() {
        let mut tree = Tree::new(&initial(), Color::White);
        let mut rng = Rng::with_seed(9);
        tree.expand(tree.root(), &mut rng);
        let first = tree.node(tree.root()).children[0];
        tree.backpropagate(first, 1);
        let selected = tree.select();
        assert_ne!(selected, first);
        assert_eq!(tree.node(selected).state.visits, 0);
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut tree = Tree::new(&initial(), Color::White);
        let mut rng = Rng::with_seed(11);
        let child = tree.expand(tree.root(), &mut rng);
        let grandchild = tree.expand(child, &mut rng);
        tree.backpropagate(grandchild, -3);
        for id in [grandchild, child, tree.root()] {
            assert_eq!(tree.node(id).state.visits, 1);
            assert_eq!(tree.node(id).state.cost, -3);
        }
    }

    #[test]
    fn test_visits_match_iterations() {
        let mut tree = Tree::new(&initial(), Color::Black);
        let mut rng = Rng::with_seed(3);
        tree_search(&mut tree, SearchLimit::Iterations(50), &mut rng);
        assert_eq!(tree.total_visits(), 50);
        let child_visits: u32 = tree
            .node(tree.root())
            .children
            .iter()
            .map(|&c| tree.node(c).state.visits)
            .sum();
        assert_eq!(child_visits, 50);
    }

    #[test]
    fn test_seeded_search_is_deterministic() {
        let run = |seed| {
            let mut tree = Tree::new(&initial(), Color::White);
            tree_search(&mut tree, SearchLimit::Iterations(100), &mut Rng::with_seed(seed))
        };
        assert_eq!(run(17), run(17));
    }

    #[test]
    fn test_zero_budget_still_returns_move() {
        let mut tree = Tree::new(&initial(), Color::White);
        let mv = tree_search(&mut tree, SearchLimit::Iterations(0), &mut Rng::with_seed(1));
        assert!(mv.is_some());
    }
}
