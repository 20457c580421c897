use clap::Parser;
use eight_puzzle_solver::dispatch::DEFAULT_WEIGHT;
use eight_puzzle_solver::engine::{create_random_solvable_state, Puzzle, PuzzleState};
use eight_puzzle_solver::heuristics::TileHeuristic;
use eight_puzzle_solver::metrics::{measure, Measured};
use eight_puzzle_solver::utils::state_from_str;
use eight_puzzle_solver::{Algorithm, SearchError, SolveOptions};
use log::{info, warn};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: BFS, DFS, UCS, Greedy, A*, Weighted A* or IDA*
    #[clap(short, long, default_value = "A*")]
    algorithm: Algorithm,

    /// Heuristic for the informed searches: Manhattan, Misplaced Tiles or Linear Conflict
    #[clap(short = 'H', long, default_value = "Manhattan")]
    heuristic: TileHeuristic,

    /// Weight for Weighted A*
    #[clap(short, long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// Depth limit for DFS
    #[clap(short, long)]
    depth_limit: Option<u32>,

    /// Give up after this many expanded nodes
    #[clap(short, long)]
    max_expanded: Option<usize>,

    /// Board to solve, row by row, `_` or 0 for the blank (e.g. "8 1 3 4 _ 2 7 6 5")
    #[clap(short, long, conflicts_with = "seed")]
    state: Option<String>,

    /// Seed for a reproducible random board (used when no --state is given)
    #[clap(long)]
    seed: Option<u64>,

    /// Print the result as JSON instead of text
    #[clap(long)]
    json: bool,
}

fn starting_state(args: &Args) -> Result<PuzzleState, SearchError> {
    match (&args.state, args.seed) {
        (Some(layout), _) => state_from_str(layout),
        (None, Some(seed)) => Ok(PuzzleState::random_with_seed(seed)),
        (None, None) => Ok(create_random_solvable_state()),
    }
}

/// IDA* keeps no explored set, so without a cap it never stops on an unsolvable board.
fn runs_unbounded(args: &Args) -> bool {
    args.algorithm == Algorithm::IdaStar && args.max_expanded.is_none()
}

fn print_text(start: PuzzleState, measured: &Measured) {
    let report = &measured.report;
    match &measured.path {
        Some(path) => {
            println!("Solution found:\n");
            println!("Moves ({}):", path.len() - 1);
            if path.len() == 1 {
                println!("  No moves made.");
            }
            for (i, node) in path.iter().enumerate().skip(1) {
                if let Some(action) = node.action {
                    println!("  Move {}: {}", i, action);
                }
                println!("{}\n", node.state);
            }
        }
        None => println!("No solution found from\n{}\n", start),
    }

    println!("Algorithm:      {}", report.algorithm);
    if let Some(heuristic) = &report.heuristic {
        println!("Heuristic:      {}", heuristic);
    }
    println!("Expanded nodes: {}", report.expanded_nodes);
    println!("Time:           {:.4}s", report.elapsed_seconds);
}

fn print_json(start: PuzzleState, measured: &Measured) -> Result<(), serde_json::Error> {
    let moves: Option<Vec<String>> = measured.path.as_ref().map(|path| {
        path.iter()
            .filter_map(|node| node.action)
            .map(|action| action.to_string())
            .collect()
    });
    let output = serde_json::json!({
        "start": start.key(),
        "moves": moves,
        "report": measured.report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let start = match starting_state(&args) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to read board: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if !start.is_solvable() {
        if runs_unbounded(&args) {
            eprintln!(
                "Board has an odd number of inversions and cannot be solved; \
                 {} would search forever. Pass --max-expanded to bound it.",
                args.algorithm
            );
            return ExitCode::FAILURE;
        }
        warn!("board has an odd number of inversions; the search will exhaust its frontier");
    }
    if !args.json {
        println!("Initial board state:\n{}\n", start);
    }

    let mut options = SolveOptions::default().weight(args.weight);
    options.depth_limit = args.depth_limit;
    options.max_expanded = args.max_expanded;

    info!("running {} from {:?}", args.algorithm, start.key());
    let measured = match measure(
        &Puzzle::new(start),
        start,
        args.algorithm,
        Some(args.heuristic),
        &options,
    ) {
        Ok(measured) => measured,
        Err(e) => {
            eprintln!("Search rejected: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        if let Err(e) = print_json(start, &measured) {
            eprintln!("Failed to write JSON: {}", e);
            return ExitCode::FAILURE;
        }
    } else {
        print_text(start, &measured);
    }
    ExitCode::SUCCESS
}
