//! Integration tests for TICTAC
//!
//! Tests the full stack: board rules, evaluation and the minimax player

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tictac_core::{
    actions, initial_state, minimax, minimax_with_rng, outcome, player, result, terminal, utility,
    winner, Action, AiConfig, Board, Cell, GameResult, Mark, MinimaxAI, PlayerType, LINES,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

/// Every board reachable from the empty board by legal play
fn reachable_boards() -> Vec<Board> {
    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![initial_state()];
    let mut out = Vec::new();

    while let Some(b) = stack.pop() {
        if !seen.insert(b) {
            continue;
        }
        out.push(b);
        if terminal(&b) {
            continue;
        }
        for a in actions(&b) {
            stack.push(result(&b, a).unwrap());
        }
    }
    out
}

// ============================================================================
// RULE PROPERTIES
// ============================================================================

#[test]
fn test_reachable_state_count() {
    // Well-known count of distinct legal tic-tac-toe positions
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_transition_properties() {
    for b in reachable_boards().into_iter().filter(|b| !terminal(b)) {
        let before = b;
        for a in actions(&b) {
            let next = result(&b, a).unwrap();
            assert_ne!(player(&next), player(&b));
            assert_eq!(next.get(a), Some(Cell::Taken(player(&b))));
            for (other, cell) in b.cells() {
                if other != a {
                    assert_eq!(next.get(other), Some(cell));
                }
            }
        }
        assert_eq!(b, before);
    }
}

#[test]
fn test_terminal_definition() {
    for b in reachable_boards() {
        let line_complete = LINES.iter().any(|l| b.line_owner(l).is_some());
        assert_eq!(terminal(&b), actions(&b).is_empty() || line_complete);
    }
}

#[test]
fn test_utility_on_terminal_boards() {
    for b in reachable_boards().into_iter().filter(terminal) {
        let u = utility(&b);
        assert!((-1..=1).contains(&u));
        let x_line = LINES.iter().any(|l| b.line_owner(l) == Some(Mark::X));
        let o_line = LINES.iter().any(|l| b.line_owner(l) == Some(Mark::O));
        assert_eq!(u == 1, x_line);
        assert_eq!(u == -1, o_line);
        assert!(!(x_line && o_line));
    }
}

// ============================================================================
// MINIMAX TESTS
// ============================================================================

#[test]
fn test_minimax_finds_immediate_win() {
    let b = board("XX./OO./...");
    assert_eq!(player(&b), Mark::X);
    assert_eq!(minimax(&b), Some(Action::new(0, 2)));
}

#[test]
fn test_minimax_returns_legal_actions() {
    // Sample every 7th position to keep the run short
    for b in reachable_boards().into_iter().step_by(7) {
        match minimax(&b) {
            None => assert!(terminal(&b)),
            Some(a) => {
                assert!(actions(&b).contains(&a));
                assert!(result(&b, a).is_ok());
            }
        }
    }
}

#[test]
fn test_opening_move_roughly_uniform() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let empty = initial_state();
    let mut counts = std::collections::HashMap::new();

    for _ in 0..900 {
        let mv = minimax_with_rng(&empty, &mut rng).unwrap();
        *counts.entry(mv).or_insert(0) += 1;
    }

    assert_eq!(counts.len(), 9);
    for (mv, n) in counts {
        assert!((50..=150).contains(&n), "{} chosen {} times", mv, n);
    }
}

#[test]
fn test_self_play_always_draws() {
    for seed in 0..9 {
        let mut ai = MinimaxAI::with_seed(seed);
        let (final_board, history) = ai.play_game(initial_state());
        assert_eq!(outcome(&final_board), GameResult::Draw);
        assert_eq!(winner(&final_board), None);
        assert_eq!(utility(&final_board), 0);
        assert_eq!(history.len(), 9);
    }
}

#[test]
fn test_minimax_as_o_never_loses_to_random() {
    for seed in 0..10 {
        let mut x = AiConfig::random().with_seed(seed).build();
        let mut o = AiConfig {
            player_type: PlayerType::Minimax,
            seed: Some(seed),
        }
        .build();
        let (final_board, _) = tictac_core::play_match_game(initial_state(), &mut x, &mut o);
        assert_ne!(outcome(&final_board), GameResult::XWins);
    }
}
