//! Play command - human vs computer on stdin/stdout

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use tictac_core::{
    initial_state, outcome, player, result, terminal, Action, AiConfig, Board, GameError,
    GameResult, Mark,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Mark the human plays (x moves first)
    #[arg(long, default_value = "x", value_parser = parse_mark)]
    pub human: Mark,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let final_board = play_game(args.human, seed, stdin.lock(), stdout.lock())?;
    tracing::info!(board = %final_board.notation(), "game finished");
    Ok(())
}

/// Run one game, reading human moves from `input` and writing to `output`
fn play_game<R: BufRead, W: Write>(
    human: Mark,
    seed: Option<u64>,
    mut input: R,
    mut output: W,
) -> Result<Board> {
    let config = match seed {
        Some(s) => AiConfig::minimax().with_seed(s),
        None => AiConfig::minimax(),
    };
    let mut computer = config.build();
    let mut board = initial_state();

    writeln!(output, "You are {}. Enter moves as \"row col\" (0-2).", human)?;

    while !terminal(&board) {
        writeln!(output, "\n{}", board)?;

        if player(&board) == human {
            board = read_human_move(&board, &mut input, &mut output)?;
        } else {
            let action = computer
                .best_move(&board)
                .context("computer found no move on a live board")?;
            board = result(&board, action)?;
            writeln!(output, "Computer plays {}", action)?;
        }
    }

    writeln!(output, "\n{}", board)?;
    writeln!(output, "{}", describe_result(outcome(&board), human))?;
    Ok(board)
}

/// Prompt until the human enters a legal move
fn read_human_move<R: BufRead, W: Write>(
    board: &Board,
    input: &mut R,
    output: &mut W,
) -> Result<Board> {
    loop {
        write!(output, "Your move: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game ended");
        }

        let action = match parse_action(&line) {
            Ok(a) => a,
            Err(msg) => {
                writeln!(output, "{}", msg)?;
                continue;
            }
        };

        match result(board, action) {
            Ok(next) => return Ok(next),
            Err(err @ (GameError::InvalidAction { .. } | GameError::OutOfBounds { .. })) => {
                writeln!(output, "{}", err)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn describe_result(game_result: GameResult, human: Mark) -> &'static str {
    match (game_result, human) {
        (GameResult::Draw, _) => "Draw.",
        (GameResult::XWins, Mark::X) | (GameResult::OWins, Mark::O) => "You win!",
        (GameResult::XWins, Mark::O) | (GameResult::OWins, Mark::X) => "Computer wins.",
        (GameResult::Ongoing, _) => "Game abandoned.",
    }
}

/// Parse "row col" or "row,col"
fn parse_action(line: &str) -> Result<Action, String> {
    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [row, col] => {
            let row = row.parse::<u8>().map_err(|_| format!("Bad row: {}", row))?;
            let col = col.parse::<u8>().map_err(|_| format!("Bad column: {}", col))?;
            Ok(Action::new(row, col))
        }
        _ => Err("Expected two numbers: row col".to_string()),
    }
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    match s {
        "x" | "X" => Ok(Mark::X),
        "o" | "O" => Ok(Mark::O),
        other => Err(format!("unknown mark '{}' (expected x or o)", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("1 2\n"), Ok(Action::new(1, 2)));
        assert_eq!(parse_action("0,0"), Ok(Action::new(0, 0)));
        assert!(parse_action("1").is_err());
        assert!(parse_action("a b").is_err());
    }

    #[test]
    fn test_parse_mark() {
        assert_eq!(parse_mark("x"), Ok(Mark::X));
        assert_eq!(parse_mark("O"), Ok(Mark::O));
        assert!(parse_mark("z").is_err());
    }

    #[test]
    fn test_human_game_never_beats_minimax() {
        // Occupied and malformed input re-prompt; afterwards the human takes
        // the first free cell in row-major order each turn
        let script = "0 1\n0 1\nnonsense\n9 9\n0 0\n0 2\n1 0\n1 1\n1 2\n2 0\n2 1\n2 2\n";
        let mut out = Vec::new();
        let board = play_game(Mark::X, Some(1), Cursor::new(script), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("already occupied"));
        assert!(text.contains("Expected two numbers"));
        assert!(text.contains("outside the 3x3 board"));
        assert_ne!(outcome(&board), GameResult::XWins);
        assert_ne!(outcome(&board), GameResult::Ongoing);
    }

    #[test]
    fn test_input_closed() {
        let mut out = Vec::new();
        let err = play_game(Mark::X, Some(1), Cursor::new(""), &mut out);
        assert!(err.is_err());
    }

    #[test]
    fn test_computer_opens_as_x() {
        // Human plays O; computer makes the opening move first
        let mut out = Vec::new();
        let _ = play_game(Mark::O, Some(2), Cursor::new(""), &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Computer plays"));
    }
}
