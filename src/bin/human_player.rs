use clap::Parser;
use eight_puzzle_solver::engine::{Game, PuzzleState, CELLS};
use eight_puzzle_solver::heuristics::TileHeuristic;
use eight_puzzle_solver::utils::state_from_str;
use eight_puzzle_solver::{Algorithm, SolveOptions};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the 8-puzzle in the terminal", long_about = None)]
struct Args {
    /// Starting board, row by row, `_` or 0 for the blank
    #[clap(short, long, conflicts_with = "seed")]
    state: Option<String>,

    /// Seed for a reproducible random starting board
    #[clap(long)]
    seed: Option<u64>,
}

/// Prints the next move of an optimal solution from the current board.
fn show_hint(game: &Game) {
    let h = TileHeuristic::LinearConflict;
    match game.solve(Algorithm::AStar, &SolveOptions::with_heuristic(&h)) {
        Ok(outcome) => match outcome.path {
            Some(path) if path.len() > 1 => {
                let next = &path[1];
                if let Some(action) = next.action {
                    println!(
                        "Hint: move the blank {} ({} moves left with best play).",
                        action,
                        path.len() - 1
                    );
                }
            }
            Some(_) => println!("Already solved."),
            None => println!("This board cannot be solved."),
        },
        Err(e) => println!("Hint unavailable: {}", e),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut game = match (&args.state, args.seed) {
        (Some(layout), _) => match state_from_str(layout) {
            Ok(state) => Game::new(state),
            Err(e) => {
                eprintln!("Failed to read board: {}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, Some(seed)) => Game::new(PuzzleState::random_with_seed(seed)),
        (None, None) => Game::new_random(&mut rand::thread_rng()),
    };
    println!("Welcome to the 8-puzzle!");
    println!("Cells are numbered 0-8, left to right and top to bottom.");

    loop {
        println!("---------------------");
        println!("Moves: {}", game.moves());
        println!("{}", game.state());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("Solved in {} moves!", game.moves());
            println!("---------------------");
            break;
        }

        print!("Enter the cell of the tile to slide, 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            "h" => show_hint(&game),
            other => match other.parse::<usize>() {
                Ok(index) if index < CELLS => {
                    if game.press_tile(index) {
                        println!("Move processed.");
                    } else {
                        println!("Invalid move: cell {} is not next to the blank.", index);
                    }
                }
                Ok(_) => println!("Invalid cell: must be between 0 and {}.", CELLS - 1),
                Err(_) => println!("Invalid input. Use a cell number, 'h', 'u' or 'q'."),
            },
        }
    }
    ExitCode::SUCCESS
}
