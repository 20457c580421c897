//! Maps an algorithm name plus its parameters to one of the search functions.
//!
//! This is the single synchronous entry point the command-line tools call:
//! `solve(problem, algorithm, options)` runs to completion on the caller's
//! thread and returns the path (or `None`) with the expanded-node count.

use crate::error::SearchError;
use crate::problem::{Heuristic, Problem};
use crate::solver::{self, Budget};
use std::fmt;
use std::str::FromStr;

pub use crate::solver::SearchOutcome;

/// Weight used by Weighted A* unless the caller picks another.
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// The supported search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Greedy,
    AStar,
    WeightedAStar,
    IdaStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Greedy,
        Algorithm::AStar,
        Algorithm::WeightedAStar,
        Algorithm::IdaStar,
    ];

    /// The canonical name, as accepted by `Algorithm::from_str`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Greedy => "Greedy",
            Algorithm::AStar => "A*",
            Algorithm::WeightedAStar => "Weighted A*",
            Algorithm::IdaStar => "IDA*",
        }
    }

    /// Whether the algorithm cannot run without a heuristic.
    pub fn needs_heuristic(self) -> bool {
        matches!(
            self,
            Algorithm::Greedy | Algorithm::AStar | Algorithm::WeightedAStar | Algorithm::IdaStar
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    /// Accepts the canonical names case-insensitively, plus shell-friendly
    /// aliases (`astar`, `weighted-astar`, `idastar`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let algorithm = match normalized.as_str() {
            "bfs" => Algorithm::Bfs,
            "dfs" => Algorithm::Dfs,
            "ucs" => Algorithm::Ucs,
            "greedy" => Algorithm::Greedy,
            "a*" | "astar" => Algorithm::AStar,
            "weighteda*" | "weightedastar" | "wastar" => Algorithm::WeightedAStar,
            "ida*" | "idastar" => Algorithm::IdaStar,
            _ => return Err(SearchError::UnsupportedAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

/// Per-call parameters for `solve`.
pub struct SolveOptions<'h, S> {
    /// Required by Greedy, A*, Weighted A* and IDA*; ignored by the others.
    pub heuristic: Option<&'h dyn Heuristic<S>>,
    /// Weighted A* only. Must be finite and at least 1.
    pub weight: f64,
    /// DFS only. Nodes deeper than this are not expanded.
    pub depth_limit: Option<u32>,
    /// Gives up (no path) after this many expansions.
    pub max_expanded: Option<usize>,
}

impl<'h, S> SolveOptions<'h, S> {
    pub fn with_heuristic(heuristic: &'h dyn Heuristic<S>) -> Self {
        SolveOptions {
            heuristic: Some(heuristic),
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    pub fn max_expanded(mut self, limit: usize) -> Self {
        self.max_expanded = Some(limit);
        self
    }

    fn budget(&self) -> Budget {
        Budget {
            max_expanded: self.max_expanded,
        }
    }
}

impl<S> Clone for SolveOptions<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SolveOptions<'_, S> {}

impl<S> Default for SolveOptions<'_, S> {
    fn default() -> Self {
        SolveOptions {
            heuristic: None,
            weight: DEFAULT_WEIGHT,
            depth_limit: None,
            max_expanded: None,
        }
    }
}

/// Runs `algorithm` from `problem.initial_state()`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::dispatch::{solve, Algorithm, SolveOptions};
/// use eight_puzzle_solver::engine::Puzzle;
/// use eight_puzzle_solver::heuristics::TileHeuristic;
///
/// let puzzle = Puzzle::new("1 2 3 4 5 6 _ 7 8".parse().unwrap());
/// let h = TileHeuristic::Manhattan;
/// let outcome = solve(&puzzle, Algorithm::AStar, &SolveOptions::with_heuristic(&h)).unwrap();
/// assert_eq!(outcome.steps(), Some(2));
///
/// // Informed searches refuse to run without a heuristic.
/// assert!(solve(&puzzle, Algorithm::AStar, &SolveOptions::default()).is_err());
/// ```
pub fn solve<P: Problem>(
    problem: &P,
    algorithm: Algorithm,
    options: &SolveOptions<'_, P::State>,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
    solve_from(problem, problem.initial_state(), algorithm, options)
}

/// Runs `algorithm` from an explicit `start` state instead of the problem's initial state.
pub fn solve_from<P: Problem>(
    problem: &P,
    start: P::State,
    algorithm: Algorithm,
    options: &SolveOptions<'_, P::State>,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
    let budget = options.budget();
    let heuristic = || options.heuristic.ok_or(SearchError::MissingHeuristic(algorithm));

    let outcome = match algorithm {
        Algorithm::Bfs => solver::breadth_first(problem, start, budget),
        Algorithm::Dfs => solver::depth_first(problem, start, options.depth_limit, budget),
        Algorithm::Ucs => solver::uniform_cost(problem, start, budget),
        Algorithm::Greedy => solver::greedy(problem, start, heuristic()?, budget),
        Algorithm::AStar => solver::a_star(problem, start, heuristic()?, budget),
        Algorithm::WeightedAStar => {
            let h = heuristic()?;
            if !options.weight.is_finite() || options.weight < 1.0 {
                return Err(SearchError::InvalidWeight(options.weight));
            }
            solver::weighted_a_star(problem, start, h, options.weight, budget)
        }
        Algorithm::IdaStar => solver::ida_star(problem, start, heuristic()?, budget),
    };
    Ok(outcome)
}

/// Like `solve`, but takes the algorithm by name.
///
/// Fails with `SearchError::UnsupportedAlgorithm` for unknown names.
pub fn solve_by_name<P: Problem>(
    problem: &P,
    algorithm: &str,
    options: &SolveOptions<'_, P::State>,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
    solve(problem, algorithm.parse()?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Puzzle, PuzzleState};
    use crate::heuristics::TileHeuristic;
    use crate::problem::Problem;
    use crate::utils::state_from_str;

    fn puzzle(layout: &str) -> Puzzle {
        Puzzle::new(state_from_str(layout).unwrap())
    }

    #[test]
    fn test_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("weighted-astar".parse::<Algorithm>(), Ok(Algorithm::WeightedAStar));
        assert_eq!("ida_star".parse::<Algorithm>(), Ok(Algorithm::IdaStar));
        assert_eq!("bfs".parse::<Algorithm>(), Ok(Algorithm::Bfs));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let p = puzzle("1234567_8");
        let result = solve_by_name(&p, "UNKNOWN", &SolveOptions::default());
        assert_eq!(
            result,
            Err(SearchError::UnsupportedAlgorithm("UNKNOWN".to_string()))
        );
    }

    #[test]
    fn test_missing_heuristic_rejected() {
        let p = puzzle("1234567_8");
        for algorithm in Algorithm::ALL {
            let result = solve(&p, algorithm, &SolveOptions::default());
            if algorithm.needs_heuristic() {
                assert_eq!(result, Err(SearchError::MissingHeuristic(algorithm)));
            } else {
                assert!(result.unwrap().is_solved(), "{}", algorithm);
            }
        }
        assert_eq!(
            solve_by_name(&p, "A*", &SolveOptions::default()),
            Err(SearchError::MissingHeuristic(Algorithm::AStar))
        );
    }

    #[test]
    fn test_every_algorithm_dispatches() {
        let p = puzzle("4 1 3 7 2 6 _ 5 8");
        let h = TileHeuristic::LinearConflict;
        let options = SolveOptions::with_heuristic(&h);
        for algorithm in Algorithm::ALL {
            let outcome = solve(&p, algorithm, &options).unwrap();
            let path = outcome.path.expect("solvable");
            assert_eq!(path[0].state, p.initial_state());
            assert!(p.is_goal(&path[path.len() - 1].state), "{}", algorithm);
        }
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let p = puzzle("1234567_8");
        let h = TileHeuristic::Manhattan;
        for weight in [0.5, f64::NAN, f64::INFINITY] {
            let options = SolveOptions::with_heuristic(&h).weight(weight);
            let result = solve(&p, Algorithm::WeightedAStar, &options);
            assert!(matches!(result, Err(SearchError::InvalidWeight(_))));
        }
        let options = SolveOptions::with_heuristic(&h).weight(1.0);
        assert!(solve(&p, Algorithm::WeightedAStar, &options).is_ok());
    }

    #[test]
    fn test_depth_limit_reaches_dfs() {
        let p = puzzle("4 1 3 7 2 6 _ 5 8");
        let options = SolveOptions::default().depth_limit(3);
        let outcome = solve(&p, Algorithm::Dfs, &options).unwrap();
        assert!(outcome.path.is_none());
    }

    #[test]
    fn test_solve_from_ignores_initial_state() {
        let p = puzzle("21345678_");
        let start = state_from_str("1234567_8").unwrap();
        let outcome = solve_from(&p, start, Algorithm::Bfs, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.steps(), Some(1));
    }

    #[test]
    fn test_max_expanded_reaches_ida_star() {
        let p = puzzle("21345678_");
        let h = TileHeuristic::Manhattan;
        let options = SolveOptions::with_heuristic(&h).max_expanded(1_000);
        let outcome = solve(&p, Algorithm::IdaStar, &options).unwrap();
        assert!(outcome.path.is_none());
        assert_eq!(outcome.expanded, 1_000);
    }

    #[test]
    fn test_closure_heuristic_through_options() {
        let p = puzzle("1234567_8");
        let h = |s: &PuzzleState| f64::from(crate::heuristics::misplaced(s));
        let outcome = solve(&p, Algorithm::Greedy, &SolveOptions::with_heuristic(&h)).unwrap();
        assert_eq!(outcome.steps(), Some(1));
    }
}
