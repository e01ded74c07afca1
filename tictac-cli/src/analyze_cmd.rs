//! Analyze command - minimax values for every legal move

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{
    action_values, outcome, player, select_action, terminal, validate_board, Action, Board,
    GameResult, Mark, Utility,
};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board in row-major notation, e.g. "XX./OO./..."
    #[arg(long)]
    pub board: String,

    /// Output analysis as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MoveValue {
    action: Action,
    value: Utility,
}

#[derive(Debug, Serialize)]
struct Analysis {
    board: String,
    result: GameResult,
    to_move: Option<Mark>,
    best_move: Option<Action>,
    moves: Vec<MoveValue>,
}

/// Run analyze command
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Invalid board: {}", args.board))?;
    validate_board(&board).context("Board cannot arise from legal play")?;

    let analysis = analyze(&board);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text_analysis(&board, &analysis);
    }
    Ok(())
}

fn analyze(board: &Board) -> Analysis {
    if terminal(board) {
        return Analysis {
            board: board.notation(),
            result: outcome(board),
            to_move: None,
            best_move: None,
            moves: Vec::new(),
        };
    }

    let to_move = player(board);
    let values = action_values(board);
    let best_move = select_action(to_move, &values).map(|(action, _)| action);
    let moves = values
        .into_iter()
        .map(|(action, value)| MoveValue { action, value })
        .collect();

    Analysis {
        board: board.notation(),
        result: GameResult::Ongoing,
        to_move: Some(to_move),
        best_move,
        moves,
    }
}

fn print_text_analysis(board: &Board, analysis: &Analysis) {
    println!("{}", board);
    match analysis.to_move {
        None => println!("Game over: {:?}", analysis.result),
        Some(mark) => {
            println!("{} to move", mark);
            for mv in &analysis.moves {
                println!("  {} -> {:+}", mv.action, mv.value);
            }
            if let Some(best) = analysis.best_move {
                println!("Best move: {}", best);
            }
        }
    }
}
