use crate::engine::{PuzzleState, GOAL, GOAL_POS, SIDE};
use crate::error::SearchError;
use crate::problem::Heuristic;
use std::fmt;
use std::str::FromStr;

/// Counts the tiles (blank excluded) that are not on their goal cell.
///
/// Admissible: every misplaced tile needs at least one move.
pub fn misplaced(state: &PuzzleState) -> u32 {
    state
        .tiles()
        .iter()
        .zip(GOAL.iter())
        .filter(|&(&tile, &goal)| tile != 0 && tile != goal)
        .count() as u32
}

/// Sums, over the non-blank tiles, the row distance plus the column distance
/// between the tile's cell and its goal cell.
///
/// Admissible and consistent: one move changes one tile's distance by exactly one.
pub fn manhattan(state: &PuzzleState) -> u32 {
    let mut dist = 0;
    for (index, &tile) in state.tiles().iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let goal_index = GOAL_POS[tile as usize];
        dist += (index / SIDE).abs_diff(goal_index / SIDE)
            + (index % SIDE).abs_diff(goal_index % SIDE);
    }
    dist as u32
}

/// Number of linear conflicts on the board.
///
/// Two tiles are in conflict when both sit in the row (or column) that holds
/// their goal cells but appear in reversed order along that line. Rows and
/// columns are counted independently.
pub fn count_linear_conflicts(state: &PuzzleState) -> u32 {
    lines(state)
        .map(|goal_indices| {
            let mut conflicts = 0;
            for i in 0..goal_indices.len() {
                for j in i + 1..goal_indices.len() {
                    if goal_indices[i] > goal_indices[j] {
                        conflicts += 1;
                    }
                }
            }
            conflicts
        })
        .sum()
}

/// Fewest tiles that must leave their goal line so the rest are in goal order.
///
/// Equal to the number of conflicts when a line holds at most one of them,
/// smaller when several conflicts share a tile (a fully reversed line of three
/// has three conflicts but needs only two tiles moved out).
pub fn count_conflict_removals(state: &PuzzleState) -> u32 {
    lines(state)
        .map(|goal_indices| (goal_indices.len() - longest_increasing_run(&goal_indices)) as u32)
        .sum()
}

/// For each row, then each column, the goal indices of the tiles lying in
/// that line whose goal cell is also in that line, in board order.
fn lines(state: &PuzzleState) -> impl Iterator<Item = Vec<usize>> + '_ {
    let tiles = state.tiles();
    (0..SIDE).flat_map(move |line| {
        let row: Vec<usize> = (0..SIDE)
            .map(|col| tiles[line * SIDE + col])
            .filter(|&t| t != 0)
            .map(|t| GOAL_POS[t as usize])
            .filter(|goal_index| goal_index / SIDE == line)
            .collect();
        let column: Vec<usize> = (0..SIDE)
            .map(|row| tiles[row * SIDE + line])
            .filter(|&t| t != 0)
            .map(|t| GOAL_POS[t as usize])
            .filter(|goal_index| goal_index % SIDE == line)
            .collect();
        [row, column]
    })
}

// Length of the longest strictly increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 0..values.len() {
        for j in 0..i {
            if values[j] < values[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

/// Manhattan distance plus two moves per tile that must step out of its goal line.
///
/// A tile leaving its line and coming back costs two moves beyond its Manhattan
/// distance; row and column penalties concern vertical and horizontal detours
/// respectively, so they add up while keeping the estimate admissible and
/// never below `manhattan`.
pub fn linear_conflict(state: &PuzzleState) -> u32 {
    manhattan(state) + 2 * count_conflict_removals(state)
}

/// The registered tile heuristics, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileHeuristic {
    Manhattan,
    Misplaced,
    LinearConflict,
}

impl TileHeuristic {
    /// Every registered heuristic, in the order they are offered to users.
    pub const ALL: [TileHeuristic; 3] = [
        TileHeuristic::Manhattan,
        TileHeuristic::Misplaced,
        TileHeuristic::LinearConflict,
    ];

    /// The human-readable registry name.
    pub fn name(self) -> &'static str {
        match self {
            TileHeuristic::Manhattan => "Manhattan",
            TileHeuristic::Misplaced => "Misplaced Tiles",
            TileHeuristic::LinearConflict => "Linear Conflict",
        }
    }

    /// The underlying heuristic function.
    pub fn function(self) -> fn(&PuzzleState) -> u32 {
        match self {
            TileHeuristic::Manhattan => manhattan,
            TileHeuristic::Misplaced => misplaced,
            TileHeuristic::LinearConflict => linear_conflict,
        }
    }

    pub fn evaluate(self, state: &PuzzleState) -> u32 {
        (self.function())(state)
    }
}

impl Heuristic<PuzzleState> for TileHeuristic {
    fn estimate(&self, state: &PuzzleState) -> f64 {
        f64::from(self.evaluate(state))
    }
}

impl fmt::Display for TileHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileHeuristic {
    type Err = SearchError;

    /// Accepts the registry names case-insensitively, ignoring spaces, dashes
    /// and underscores, plus the short form "misplaced".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "manhattan" => Ok(TileHeuristic::Manhattan),
            "misplaced" | "misplacedtiles" => Ok(TileHeuristic::Misplaced),
            "linearconflict" => Ok(TileHeuristic::LinearConflict),
            _ => Err(SearchError::UnknownHeuristic(s.to_string())),
        }
    }
}
