//! TICTAC Core - Game rules and minimax AI
//!
//! This crate provides the decision logic for tic-tac-toe:
//! - Board representation (marks, cells, actions, lines)
//! - Turn tracking and move generation
//! - Win detection and utility
//! - Exhaustive minimax search

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Action, Board, Cell, Line, Mark, MarkCounts, BOARD_SIZE, LINES};
pub use game::{actions, initial_state, player, result, sorted_actions, validate_board};
pub use eval::{outcome, terminal, utility, winner, GameResult, Utility};
pub use ai::{
    action_values, max_value, min_value, minimax, minimax_with_rng, play_match_game, select_action,
    AiPlayer, MinimaxAI, RandomAI,
};
pub use config::{AiConfig, PlayerType};
pub use error::GameError;
