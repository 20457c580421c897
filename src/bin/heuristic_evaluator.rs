use clap::Parser;
use eight_puzzle_solver::engine::{Puzzle, PuzzleState};
use eight_puzzle_solver::heuristics::TileHeuristic;
use eight_puzzle_solver::metrics::{compare_heuristics, SolveReport};
use eight_puzzle_solver::{Algorithm, SolveOptions};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, long_about = None)]
#[clap(about = "Compare the tile heuristics over random boards")]
struct Args {
    /// Informed algorithm to evaluate the heuristics with
    #[clap(short, long, default_value = "A*")]
    algorithm: Algorithm,

    /// Number of random boards
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board `i` uses `start_seed + i`
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Weight for Weighted A*
    #[clap(short, long, default_value_t = eight_puzzle_solver::dispatch::DEFAULT_WEIGHT)]
    weight: f64,

    /// Give up on a board after this many expanded nodes
    #[clap(short, long)]
    max_expanded: Option<usize>,

    /// Print the averages as JSON instead of a table
    #[clap(long)]
    json: bool,
}

/// Averages for one heuristic over the boards it solved.
#[derive(Debug, Serialize)]
struct Summary {
    heuristic: String,
    solved: usize,
    failed: usize,
    average_steps: f64,
    average_expanded: f64,
    average_seconds: f64,
}

impl Summary {
    fn from_reports(heuristic: TileHeuristic, reports: &[SolveReport], failed: usize) -> Self {
        let solved: Vec<&SolveReport> = reports.iter().filter(|r| r.solution_found).collect();
        let n = solved.len();
        let mean = |total: f64| if n == 0 { 0.0 } else { total / n as f64 };
        Summary {
            heuristic: heuristic.name().to_string(),
            solved: n,
            failed: failed + reports.len() - n,
            average_steps: mean(solved.iter().filter_map(|r| r.steps).sum::<usize>() as f64),
            average_expanded: mean(solved.iter().map(|r| r.expanded_nodes).sum::<usize>() as f64),
            average_seconds: mean(solved.iter().map(|r| r.elapsed_seconds).sum()),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if !args.algorithm.needs_heuristic() {
        eprintln!(
            "{} does not use a heuristic; pick Greedy, A*, Weighted A* or IDA*.",
            args.algorithm
        );
        return ExitCode::FAILURE;
    }

    let mut options = SolveOptions::default().weight(args.weight);
    options.max_expanded = args.max_expanded;

    let mut reports: HashMap<TileHeuristic, Vec<SolveReport>> = HashMap::new();
    let mut failures: HashMap<TileHeuristic, usize> = HashMap::new();

    if !args.json {
        println!("Evaluating heuristics with {} on {} boards...", args.algorithm, args.boards);
    }

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let puzzle = Puzzle::new(PuzzleState::random_with_seed(seed));
        info!("board {} (seed {})", board_idx, seed);

        for (heuristic, row) in compare_heuristics(&puzzle, args.algorithm, &options) {
            match row {
                Ok(report) => {
                    if !args.json {
                        println!(
                            "  Board {:<3} {:<16} Steps: {:<4} Expanded: {:<8} Time: {:.4}s",
                            board_idx,
                            heuristic.name(),
                            report.steps.map_or("-".to_string(), |s| s.to_string()),
                            report.expanded_nodes,
                            report.elapsed_seconds
                        );
                    }
                    reports.entry(heuristic).or_default().push(report);
                }
                Err(e) => {
                    warn!("{} on board {} was rejected: {}", heuristic, board_idx, e);
                    *failures.entry(heuristic).or_default() += 1;
                }
            }
        }
    }

    let mut summaries: Vec<Summary> = TileHeuristic::ALL
        .into_iter()
        .map(|h| {
            let rows = reports.get(&h).map(Vec::as_slice).unwrap_or(&[]);
            Summary::from_reports(h, rows, failures.get(&h).copied().unwrap_or(0))
        })
        .collect();
    // Fewest expansions first.
    summaries.sort_by(|a, b| a.average_expanded.total_cmp(&b.average_expanded));

    if args.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to write JSON: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("\n--- Evaluation Complete ---");
    println!("Boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");
    for s in &summaries {
        println!(
            "{:<16}: Steps = {:.2}, Expanded = {:.1}, Time = {:.4}s (solved {}, failed {})",
            s.heuristic, s.average_steps, s.average_expanded, s.average_seconds, s.solved, s.failed
        );
    }
    ExitCode::SUCCESS
}
