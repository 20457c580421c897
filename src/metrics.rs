//! Timing and reporting around `solve`.
//!
//! A `SolveReport` is a plain record meant for display: which algorithm and
//! heuristic ran, whether a path was found, its length, how many nodes were
//! expanded and how long the call took. It plays no part in search correctness.

use crate::dispatch::{solve_from, Algorithm, SolveOptions};
use crate::engine::{Move, Puzzle, PuzzleState};
use crate::error::SearchError;
use crate::heuristics::TileHeuristic;
use crate::problem::{Heuristic, Node, Problem};
use serde::Serialize;
use std::time::Instant;

/// Metrics for one timed solve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveReport {
    pub algorithm: String,
    pub heuristic: Option<String>,
    pub solution_found: bool,
    /// Number of moves on the path, `None` when no path was found.
    pub steps: Option<usize>,
    /// For IDA* this is the number of generated children, see `solver`.
    pub expanded_nodes: usize,
    pub elapsed_seconds: f64,
}

/// A timed solve: the report plus the path itself for callers that replay it.
#[derive(Clone, Debug)]
pub struct Measured {
    pub report: SolveReport,
    pub path: Option<Vec<Node<PuzzleState, Move>>>,
}

/// Times one `solve_from` call on `puzzle` starting at `start`.
///
/// `heuristic`, when given, replaces `options.heuristic` for this run. It is
/// the only source of the report's heuristic name: a heuristic passed solely
/// through `options` is used by the search but reported as `None`, since an
/// arbitrary `&dyn Heuristic` has no registry name. The name is also left out
/// when the algorithm does not use a heuristic.
pub fn measure(
    puzzle: &Puzzle,
    start: PuzzleState,
    algorithm: Algorithm,
    heuristic: Option<TileHeuristic>,
    options: &SolveOptions<'_, PuzzleState>,
) -> Result<Measured, SearchError> {
    let mut options = *options;
    if let Some(h) = heuristic.as_ref() {
        options.heuristic = Some(h as &dyn Heuristic<PuzzleState>);
    }

    let started = Instant::now();
    let outcome = solve_from(puzzle, start, algorithm, &options)?;
    let elapsed_seconds = started.elapsed().as_secs_f64();

    let report = SolveReport {
        algorithm: algorithm.to_string(),
        heuristic: heuristic
            .filter(|_| algorithm.needs_heuristic())
            .map(|h| h.name().to_string()),
        solution_found: outcome.is_solved(),
        steps: outcome.steps(),
        expanded_nodes: outcome.expanded,
        elapsed_seconds,
    };
    log::debug!(
        "{} ({}) from {:?}: steps={:?} expanded={} in {:.4}s",
        report.algorithm,
        report.heuristic.as_deref().unwrap_or("-"),
        start.key(),
        report.steps,
        report.expanded_nodes,
        report.elapsed_seconds
    );
    Ok(Measured {
        report,
        path: outcome.path,
    })
}

/// Runs `algorithm` once per registered heuristic from the puzzle's initial state.
///
/// One row per heuristic in `TileHeuristic::ALL` order. A heuristic whose
/// run is rejected (for instance an invalid weight) yields an `Err` row
/// rather than aborting the comparison.
pub fn compare_heuristics(
    puzzle: &Puzzle,
    algorithm: Algorithm,
    options: &SolveOptions<'_, PuzzleState>,
) -> Vec<(TileHeuristic, Result<SolveReport, SearchError>)> {
    let start = puzzle.initial_state();
    TileHeuristic::ALL
        .into_iter()
        .map(|h| {
            let row = measure(puzzle, start, algorithm, Some(h), options).map(|m| m.report);
            (h, row)
        })
        .collect()
}
