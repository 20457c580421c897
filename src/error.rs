//! Error taxonomy shared by the containers, the domain model and the dispatcher.
//!
//! "No solution" is not an error: an exhausted frontier is reported as
//! `SearchOutcome { path: None, .. }`.

use crate::dispatch::Algorithm;
use crate::engine::Move;

/// Errors surfaced by the solver library.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A `pop`/`dequeue` was attempted on an empty container.
    #[error("pop from empty {0}")]
    EmptyContainer(&'static str),

    /// The dispatcher was handed a name it does not know.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// An informed algorithm was requested without a heuristic.
    #[error("{0} requires a heuristic")]
    MissingHeuristic(Algorithm),

    /// Weighted A* weights must be finite and at least 1.
    #[error("invalid weight {0}: must be a finite value >= 1")]
    InvalidWeight(f64),

    /// A tile layout that is not a permutation of 0..=8.
    #[error("invalid puzzle state: {0}")]
    InvalidState(String),

    /// A manual move that would push the blank off the board.
    #[error("illegal move {0}: blank would leave the board")]
    IllegalMove(Move),

    /// A heuristic name missing from the registry.
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),
}
