//! # 8-Puzzle Solver Library
//!
//! This library provides a generic graph-search framework and seven search
//! algorithms (BFS, DFS, Uniform-Cost, Greedy, A*, Weighted A*, IDA*), applied
//! to the 3x3 sliding-tile puzzle.
//!
//! It is used by three binaries:
//! - `ai_solver`: Solves one board with a chosen algorithm and heuristic and
//!   prints the move sequence together with its metrics.
//! - `human_player`: Allows interactive play via the command line, with undo
//!   and solver hints from the current board.
//! - `heuristic_evaluator`: Runs every heuristic over a batch of seeded random
//!   boards and prints the average cost of each.
//!
//! ## Modules
//! - `structures`: Stack, circular queue and the stable min-priority queue the
//!   frontiers are built on.
//! - `problem`: The `Problem` and `Heuristic` traits, search nodes and the
//!   node arena used for path reconstruction.
//! - `engine`: Board representation (`PuzzleState`), moves, solvability, the
//!   `Puzzle` problem and the manual-play `Game` session.
//! - `heuristics`: Misplaced tiles, Manhattan distance and linear conflict.
//! - `solver`: The search algorithms themselves.
//! - `dispatch`: Algorithm names, `SolveOptions` and the `solve` entry point.
//! - `metrics`: Timing and reporting around a solve.
//! - `utils`: Parsing board layouts from text.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod metrics;
pub mod problem;
pub mod solver;
pub mod structures;
pub mod utils;

pub use dispatch::{solve, solve_by_name, solve_from, Algorithm, SearchOutcome, SolveOptions};
pub use error::SearchError;
