//! Match command - play games between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{ensure, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tictac_core::{initial_state, outcome, play_match_game, Action, AiConfig, GameResult, PlayerType};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Player for X (minimax or random)
    #[arg(long, default_value = "minimax")]
    pub x: PlayerType,

    /// Player for O (minimax or random)
    #[arg(long, default_value = "minimax")]
    pub o: PlayerType,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    moves: Vec<Action>,
    final_board: String,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    x_player: PlayerType,
    o_player: PlayerType,
    games: Vec<GameRecord>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    ensure!(args.games > 0, "--games must be at least 1");

    tracing::info!(
        "Starting match: {} (X) vs {} (O), {} games",
        args.x,
        args.o,
        args.games
    );

    let results = play_match(&args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, seed: Option<u64>) -> MatchResults {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let x_config = AiConfig {
            player_type: args.x,
            seed: None,
        }
        .with_seed(rng.gen());
        let o_config = AiConfig {
            player_type: args.o,
            seed: None,
        }
        .with_seed(rng.gen());

        let record = play_single_game(&x_config, &o_config, game_num + 1);

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves.len()
        );

        games.push(record);
    }

    compute_match_statistics(args.x, args.o, games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game from the empty board
fn play_single_game(x_config: &AiConfig, o_config: &AiConfig, game_number: usize) -> GameRecord {
    let mut x = x_config.build();
    let mut o = o_config.build();

    let (final_board, moves) = play_match_game(initial_state(), &mut x, &mut o);

    GameRecord {
        game_number,
        result: outcome(&final_board),
        moves,
        final_board: final_board.notation(),
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(
    x_player: PlayerType,
    o_player: PlayerType,
    games: Vec<GameRecord>,
) -> MatchResults {
    let count = |r: GameResult| games.iter().filter(|g| g.result == r).count();
    let x_wins = count(GameResult::XWins);
    let o_wins = count(GameResult::OWins);
    let draws = count(GameResult::Draw);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        x_player,
        o_player,
        games,
        x_wins,
        o_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(n: usize, total: usize) -> f32 {
    if total > 0 {
        n as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        result: GameResult,
        moves: &'a [Action],
        final_board: &'a str,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        x_player: PlayerType,
        o_player: PlayerType,
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        x_player: results.x_player,
        o_player: results.o_player,
        total_games: results.games.len(),
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                moves: &g.moves,
                final_board: &g.final_board,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("{} (X) vs {} (O)", results.x_player, results.o_player);
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves ({})",
            game.game_number,
            game.result,
            game.moves.len(),
            game.final_board
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
