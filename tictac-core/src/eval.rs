//! Terminal detection, winner and utility

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, LINES};

/// Utility of a board from X's perspective
pub type Utility = i32;

/// X has three in a row
pub const X_WIN: Utility = 1;
/// O has three in a row
pub const O_WIN: Utility = -1;
pub const DRAW: Utility = 0;

/// Marks a player needs on the board before a line is possible
const MARKS_FOR_LINE: u8 = 3;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    XWins,
    OWins,
    Draw,
}

/// Mark holding a complete line, first found in scan order
pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| board.line_owner(line))
}

/// True once the board is full or some line is complete
pub fn terminal(board: &Board) -> bool {
    let counts = board.counts();
    if counts.empty == 0 {
        return true;
    }
    // Nobody can hold a line yet
    if counts.x < MARKS_FOR_LINE && counts.o < MARKS_FOR_LINE {
        return false;
    }
    winner(board).is_some()
}

/// +1 if X won, -1 if O won, 0 otherwise.
///
/// Only meaningful on terminal boards.
pub fn utility(board: &Board) -> Utility {
    match winner(board) {
        Some(Mark::X) => X_WIN,
        Some(Mark::O) => O_WIN,
        None => DRAW,
    }
}

/// Classify a board as ongoing, won or drawn
pub fn outcome(board: &Board) -> GameResult {
    if !terminal(board) {
        return GameResult::Ongoing;
    }
    match winner(board) {
        Some(Mark::X) => GameResult::XWins,
        Some(Mark::O) => GameResult::OWins,
        None => GameResult::Draw,
    }
}
