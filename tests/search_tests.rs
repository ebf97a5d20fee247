//! Integration tests for minimax, alpha-beta and MCTS through the public API.

use std::time::Duration;

use fastrand::Rng;

use prize_chess::EngineError;
use prize_chess::board::{Board, Cell, Color, Kind, Piece};
use prize_chess::constants::INFINITY;
use prize_chess::engine::{Engine, EngineConfig, Strategy};
use prize_chess::mcts::{SearchLimit, Tree, tree_search};
use prize_chess::minimax::{Minimax, search_alpha_beta, search_minimax};
use prize_chess::moves::generate_moves;
use prize_chess::position::{Position, Scores, play_move};

fn random_position(seed: u64, plies: usize) -> (Position, Color) {
    let mut rng = Rng::with_seed(seed);
    let mut pos = Position::new(Board::initial(), Scores::default());
    let mut color = Color::White;
    for _ in 0..plies {
        let moves = generate_moves(&pos.board, color);
        if pos.game_over() || moves.is_empty() {
            break;
        }
        play_move(&mut pos, moves[rng.usize(..moves.len())], color);
        color = color.opponent();
    }
    (pos, color)
}

fn place(board: &mut Board, row: usize, col: usize, color: Color, kind: Kind) {
    board.set(row, col, Cell::Piece(Piece::new(color, kind)));
}

/// White can only push the pawn on 6,1: the king is boxed in and the other
/// pawn is blocked.
fn single_move_board() -> Board {
    let mut board = Board::empty();
    place(&mut board, 6, 0, Color::White, Kind::King);
    place(&mut board, 5, 0, Color::White, Kind::Pawn);
    place(&mut board, 6, 1, Color::White, Kind::Pawn);
    place(&mut board, 4, 0, Color::Black, Kind::Pawn);
    place(&mut board, 0, 4, Color::Black, Kind::King);
    board
}

// =============================================================================
// Minimax and alpha-beta
// =============================================================================

#[test]
fn test_alpha_beta_matches_minimax() {
    for seed in 0..12 {
        for plies in [0, 4, 10, 20] {
            let (pos, color) = random_position(seed, plies);
            for depth in 1..=3 {
                let plain = search_minimax(&pos, depth, color);
                let pruned = search_alpha_beta(&pos, depth, color);
                assert_eq!(
                    plain.value, pruned.value,
                    "seed {seed} plies {plies} depth {depth}"
                );
                assert_eq!(plain.mv, pruned.mv, "seed {seed} plies {plies} depth {depth}");
            }
        }
    }
}

#[test]
fn test_alpha_beta_matches_minimax_deeper_from_opening() {
    let pos = Position::new(Board::initial(), Scores::default());
    for color in [Color::White, Color::Black] {
        let plain = search_minimax(&pos, 4, color);
        let pruned = search_alpha_beta(&pos, 4, color);
        assert_eq!(plain, pruned);
    }
}

#[test]
fn test_searches_leave_working_position_untouched() {
    let (pos, color) = random_position(99, 12);
    let mut searcher = Minimax::new(&pos);
    searcher.minimax(3, color);
    searcher.alpha_beta(3, color, -INFINITY, INFINITY);
    assert_eq!(*searcher.position(), pos);
}

#[test]
fn test_minimax_best_move_is_generated() {
    for seed in 0..8 {
        let (pos, color) = random_position(seed, 6);
        if pos.game_over() {
            continue;
        }
        let moves = generate_moves(&pos.board, color);
        let node = search_alpha_beta(&pos, 3, color);
        match node.mv {
            Some(mv) => assert!(moves.contains(&mv)),
            None => assert!(moves.is_empty()),
        }
    }
}

// =============================================================================
// MCTS
// =============================================================================

#[test]
fn test_mcts_single_legal_move() {
    let board = single_move_board();
    assert!(!board.game_over());
    assert_eq!(generate_moves(&board, Color::White).len(), 1);

    let config = EngineConfig::with_strategy(Strategy::Mcts)
        .with_time_budget(Duration::from_millis(20))
        .with_seed(4);
    let mut engine = Engine::new(config);
    let mv = engine
        .select_best_move(&board, Scores::default(), Color::White)
        .unwrap();
    assert_eq!(mv.to_string(), "6151");
}

#[test]
fn test_mcts_returns_root_child() {
    let pos = Position::new(Board::initial(), Scores::default());
    let mut tree = Tree::new(&pos, Color::White);
    let mv = tree_search(&mut tree, SearchLimit::Iterations(200), &mut Rng::with_seed(8)).unwrap();
    assert!(generate_moves(&pos.board, Color::White).contains(&mv));

    // The chosen child has the greatest accumulated reward.
    let root = tree.node(tree.root());
    let best_cost = root
        .children
        .iter()
        .map(|&c| tree.node(c).state.cost)
        .max()
        .unwrap();
    let chosen = root
        .children
        .iter()
        .find(|&&c| tree.node(c).state.mv == Some(mv))
        .unwrap();
    assert_eq!(tree.node(*chosen).state.cost, best_cost);
}

#[test]
fn test_mcts_time_budget_is_respected() {
    let config = EngineConfig::with_strategy(Strategy::Mcts)
        .with_time_budget(Duration::from_millis(50))
        .with_seed(2);
    let mut engine = Engine::new(config);
    let start = std::time::Instant::now();
    engine
        .select_best_move(&Board::initial(), Scores::default(), Color::Black)
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
}

// =============================================================================
// Engine entry point
// =============================================================================

#[test]
fn test_engine_strategies_agree_on_forced_move() {
    for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
        let mut config = EngineConfig::with_strategy(strategy);
        config.minimax_depth = 3;
        config.alphabeta_depth = 3;
        let mut engine = Engine::new(config);
        let mv = engine
            .select_best_move(&single_move_board(), Scores::default(), Color::White)
            .unwrap();
        assert_eq!(mv.to_string(), "6151", "{strategy}");
    }
}

#[test]
fn test_engine_reports_stuck_side() {
    let mut board = single_move_board();
    // Block the last pawn too.
    place(&mut board, 5, 1, Color::Black, Kind::Rook);
    let mut engine = Engine::default();
    let err = engine
        .select_best_move(&board, Scores::default(), Color::White)
        .unwrap_err();
    assert_eq!(err, EngineError::NoLegalMoves);
}

#[test]
fn test_engine_takes_the_king() {
    let mut board = Board::empty();
    place(&mut board, 6, 0, Color::White, Kind::King);
    place(&mut board, 4, 2, Color::White, Kind::Rook);
    place(&mut board, 1, 2, Color::Black, Kind::King);
    place(&mut board, 0, 4, Color::Black, Kind::Pawn);
    let mut config = EngineConfig::with_strategy(Strategy::AlphaBeta);
    config.alphabeta_depth = 1;
    let mut engine = Engine::new(config);
    let mv = engine
        .select_best_move(&board, Scores::default(), Color::White)
        .unwrap();
    assert_eq!(mv.to_string(), "4212");
}

#[test]
fn test_ties_keep_first_generated_move() {
    // Every opening pawn push scores the same at depth 1.
    let pos = Position::new(Board::initial(), Scores::default());
    let first = generate_moves(&pos.board, Color::White)[0];
    assert_eq!(first.to_string(), "5040");

    let mm = search_minimax(&pos, 1, Color::White);
    let ab = search_alpha_beta(&pos, 1, Color::White);
    assert_eq!(mm.mv, Some(first));
    assert_eq!(mm.value, 1);
    assert_eq!(ab, mm);
}
