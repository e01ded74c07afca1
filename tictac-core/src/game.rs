//! Turn tracking, move generation and board transitions

use rustc_hash::FxHashSet;

use crate::board::{Action, Board, Cell, Mark, LINES};
use crate::error::GameError;

// ============================================================================
// STATE UTILITIES
// ============================================================================

/// Starting board: every cell empty
pub fn initial_state() -> Board {
    Board::empty()
}

/// Mark of the side to move.
///
/// X moves whenever both sides have placed the same number of marks,
/// O otherwise. This is the only place the turn rule lives; there is no
/// stored turn field. Meaningless on a terminal board.
pub fn player(board: &Board) -> Mark {
    let counts = board.counts();
    if counts.x == counts.o {
        Mark::X
    } else {
        Mark::O
    }
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// All empty cells. Unordered; empty for a full board.
pub fn actions(board: &Board) -> FxHashSet<Action> {
    board
        .cells()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(action, _)| action)
        .collect()
}

/// Legal actions in (row, col) order
pub fn sorted_actions(board: &Board) -> Vec<Action> {
    let mut moves: Vec<Action> = actions(board).into_iter().collect();
    moves.sort_unstable();
    moves
}

// ============================================================================
// TRANSITION
// ============================================================================

/// Board after the side to move marks `action`. The input is untouched.
pub fn result(board: &Board, action: Action) -> Result<Board, GameError> {
    match board.get(action) {
        None => Err(GameError::OutOfBounds {
            row: action.row,
            col: action.col,
        }),
        Some(Cell::Taken(_)) => Err(GameError::InvalidAction {
            row: action.row,
            col: action.col,
        }),
        Some(Cell::Empty) => Ok(board.with_cell(action, player(board).into())),
    }
}

/// Check that a board could have arisen from legal play.
///
/// Rejects boards where the mark counts are out of turn order, or where
/// both sides hold a complete line.
pub fn validate_board(board: &Board) -> Result<(), GameError> {
    let counts = board.counts();
    if counts.x != counts.o && counts.x != counts.o + 1 {
        return Err(GameError::MalformedBoard(format!(
            "{} X marks and {} O marks cannot occur in turn order",
            counts.x, counts.o
        )));
    }

    let x_line = LINES.iter().any(|l| board.line_owner(l) == Some(Mark::X));
    let o_line = LINES.iter().any(|l| board.line_owner(l) == Some(Mark::O));
    if x_line && o_line {
        return Err(GameError::MalformedBoard(
            "both players have three in a row".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let b = initial_state();
        assert_eq!(b.counts().empty, 9);
        assert_eq!(player(&b), Mark::X);
        assert_eq!(actions(&b).len(), 9);
    }

    #[test]
    fn test_player_from_counts() {
        assert_eq!(player(&board("X../.../...")), Mark::O);
        assert_eq!(player(&board("XO./.../...")), Mark::X);
        assert_eq!(player(&board("XX./OO./...")), Mark::X);
        assert_eq!(player(&board("XX./O../...")), Mark::O);
    }

    #[test]
    fn test_player_alternates() {
        let mut b = initial_state();
        for action in Action::all() {
            let before = player(&b);
            b = result(&b, action).unwrap();
            assert_eq!(player(&b), before.opponent());
        }
    }

    #[test]
    fn test_actions_full_board() {
        assert!(actions(&board("XOX/XOO/OXX")).is_empty());
    }

    #[test]
    fn test_actions_are_empty_cells() {
        let b = board("XX./OO./...");
        let moves = sorted_actions(&b);
        assert_eq!(moves.len(), 5);
        assert_eq!(moves[0], Action::new(0, 2));
        assert_eq!(moves[1], Action::new(1, 2));
        for a in moves {
            assert_eq!(b.get(a), Some(Cell::Empty));
        }
    }

    #[test]
    fn test_result_places_current_mark() {
        let b = board("X../.../...");
        let next = result(&b, Action::new(1, 1)).unwrap();
        assert_eq!(next.get(Action::new(1, 1)), Some(Cell::Taken(Mark::O)));

        // Only the target cell differs
        for (a, cell) in b.cells() {
            if a != Action::new(1, 1) {
                assert_eq!(next.get(a), Some(cell));
            }
        }
    }

    #[test]
    fn test_result_does_not_mutate_input() {
        let b = initial_state();
        let snapshot = b;
        let next = result(&b, Action::new(0, 0)).unwrap();
        assert_eq!(b, snapshot);
        assert_ne!(b, next);
    }

    #[test]
    fn test_result_occupied_cell() {
        let b = board("X../.../...");
        assert_eq!(
            result(&b, Action::new(0, 0)),
            Err(GameError::InvalidAction { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_result_out_of_bounds() {
        assert_eq!(
            result(&initial_state(), Action::new(0, 3)),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
    }

    #[test]
    fn test_validate_board() {
        assert!(validate_board(&initial_state()).is_ok());
        assert!(validate_board(&board("XX./OO./...")).is_ok());
        assert!(validate_board(&board("XX./O../...")).is_ok());
        assert!(matches!(
            validate_board(&board("OO./.../...")),
            Err(GameError::MalformedBoard(_))
        ));
        assert!(matches!(
            validate_board(&board("XXX/.../...")),
            Err(GameError::MalformedBoard(_))
        ));
        assert!(matches!(
            validate_board(&board("XXX/OOO/...")),
            Err(GameError::MalformedBoard(_))
        ));
    }
}
