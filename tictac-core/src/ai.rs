//! Exhaustive minimax search and AI players

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Action, Board, Mark};
use crate::eval::{terminal, utility, Utility};
use crate::game::{actions, player, result, sorted_actions};

/// Default seed for reproducible players
pub const DEFAULT_SEED: u64 = 42;

// ============================================================================
// MINIMAX
// ============================================================================

/// Optimal action for the side to move, `None` on a terminal board.
///
/// Uses the thread-local RNG for the opening move; see [`minimax_with_rng`].
pub fn minimax(board: &Board) -> Option<Action> {
    minimax_with_rng(board, &mut rand::thread_rng())
}

/// Optimal action for the side to move.
///
/// On a board with no marks every opening is equivalent, so the full-width
/// search is skipped and a legal action is drawn uniformly with `rng`.
/// Otherwise X takes the highest-valued action and O the lowest; ties go to
/// the smallest (row, col).
pub fn minimax_with_rng<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Action> {
    if terminal(board) {
        return None;
    }

    if board.counts().placed() == 0 {
        let opening = sorted_actions(board).choose(rng).copied();
        tracing::debug!(?opening, "random opening move");
        return opening;
    }

    let to_move = player(board);
    let best = select_action(to_move, &action_values(board));

    if let Some((action, value)) = best {
        tracing::debug!(player = %to_move, %action, value, "minimax choice");
    }

    best.map(|(action, _)| action)
}

/// Pick the max-valued entry for X or min-valued for O.
///
/// Only a strict improvement replaces the current pick, so with `values`
/// in (row, col) order the earliest action wins ties.
pub fn select_action(to_move: Mark, values: &[(Action, Utility)]) -> Option<(Action, Utility)> {
    let mut best: Option<(Action, Utility)> = None;

    for &(action, value) in values {
        let better = match best {
            None => true,
            Some((_, best_value)) => match to_move {
                Mark::X => value > best_value,
                Mark::O => value < best_value,
            },
        };
        if better {
            best = Some((action, value));
        }
    }

    best
}

/// Minimax value of every legal action, sorted by action
pub fn action_values(board: &Board) -> Vec<(Action, Utility)> {
    let to_move = player(board);

    sorted_actions(board)
        .into_iter()
        .filter_map(|action| {
            let child = result(board, action).ok()?;
            let value = match to_move {
                Mark::X => min_value(&child),
                Mark::O => max_value(&child),
            };
            Some((action, value))
        })
        .collect()
}

/// Best utility X can force when X is to move
pub fn max_value(board: &Board) -> Utility {
    if terminal(board) {
        return utility(board);
    }

    let mut value = Utility::MIN;
    for action in actions(board) {
        if let Ok(child) = result(board, action) {
            value = value.max(min_value(&child));
        }
    }
    value
}

/// Best utility O can force when O is to move
pub fn min_value(board: &Board) -> Utility {
    if terminal(board) {
        return utility(board);
    }

    let mut value = Utility::MAX;
    for action in actions(board) {
        if let Ok(child) = result(board, action) {
            value = value.min(max_value(&child));
        }
    }
    value
}

// ============================================================================
// PLAYERS
// ============================================================================

/// Minimax player with its own seeded RNG for the opening move
pub struct MinimaxAI {
    rng: ChaCha8Rng,
}

impl MinimaxAI {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Get best move for current position
    pub fn best_move(&mut self, board: &Board) -> Option<Action> {
        minimax_with_rng(board, &mut self.rng)
    }

    /// Play both sides from `initial` until the game ends
    pub fn play_game(&mut self, initial: Board) -> (Board, Vec<Action>) {
        play_out(initial, |b| self.best_move(b))
    }
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniformly random legal mover
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn best_move(&mut self, board: &Board) -> Option<Action> {
        if terminal(board) {
            return None;
        }
        sorted_actions(board).choose(&mut self.rng).copied()
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

/// Either kind of computer player
pub enum AiPlayer {
    Minimax(MinimaxAI),
    Random(RandomAI),
}

impl AiPlayer {
    pub fn best_move(&mut self, board: &Board) -> Option<Action> {
        match self {
            AiPlayer::Minimax(ai) => ai.best_move(board),
            AiPlayer::Random(ai) => ai.best_move(board),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AiPlayer::Minimax(_) => "minimax",
            AiPlayer::Random(_) => "random",
        }
    }
}

/// Play a game where `x` moves for X and `o` for O
pub fn play_match_game(initial: Board, x: &mut AiPlayer, o: &mut AiPlayer) -> (Board, Vec<Action>) {
    play_out(initial, |b| match player(b) {
        Mark::X => x.best_move(b),
        Mark::O => o.best_move(b),
    })
}

fn play_out<F>(initial: Board, mut choose: F) -> (Board, Vec<Action>)
where
    F: FnMut(&Board) -> Option<Action>,
{
    let mut board = initial;
    let mut history = Vec::new();

    while !terminal(&board) {
        let Some(action) = choose(&board) else {
            break;
        };
        match result(&board, action) {
            Ok(next) => {
                board = next;
                history.push(action);
            }
            Err(err) => {
                tracing::warn!(%err, "player chose an illegal action");
                break;
            }
        }
    }

    (board, history)
}

// ============================================================================
// TESTS
// ============================================================================
