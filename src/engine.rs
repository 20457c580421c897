//! 8-puzzle domain model.
//!
//! This module defines the concrete puzzle the solvers work on:
//! - `PuzzleState`: an immutable 3x3 tile layout, `0` standing for the blank.
//! - `Move`: the direction the blank slides in.
//! - `Puzzle`: the `Problem` implementation (goal test, legal moves, transition).
//! - `Game`: a manual-play session that owns the current board, counts moves and
//!   keeps a history for undo. Solving from the current board goes through
//!   `Game::solve`, which passes the board explicitly to the dispatcher.
use crate::dispatch::{solve_from, Algorithm, SearchOutcome, SolveOptions};
use crate::error::SearchError;
use crate::problem::Problem;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Width and height of the board.
pub const SIDE: usize = 3;

/// Number of cells on the board, blank included.
pub const CELLS: usize = SIDE * SIDE;

/// The solved layout: tiles in reading order, blank in the bottom-right corner.
pub const GOAL: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// `GOAL_POS[v]` is the index tile `v` occupies in `GOAL`.
pub const GOAL_POS: [usize; CELLS] = goal_positions();

const fn goal_positions() -> [usize; CELLS] {
    let mut pos = [0; CELLS];
    let mut i = 0;
    while i < CELLS {
        pos[GOAL[i] as usize] = i;
        i += 1;
    }
    pos
}

/// A direction for the blank to slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the order they are enumerated during expansion.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, column)` offset applied to the blank.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// An immutable board layout. Two states are equal iff their tiles are equal.
///
/// Construction through `PuzzleState::new` guarantees the tiles are a
/// permutation of `0..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    tiles: [u8; CELLS],
}

impl PuzzleState {
    /// Validates `tiles` as a permutation of `0..=8`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::PuzzleState;
    ///
    /// assert!(PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).is_ok());
    /// assert!(PuzzleState::new([1, 1, 3, 4, 5, 6, 7, 0, 8]).is_err());
    /// ```
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, SearchError> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            let slot = seen.get_mut(tile as usize).ok_or_else(|| {
                SearchError::InvalidState(format!("tile {} is outside 0..={}", tile, CELLS - 1))
            })?;
            if *slot {
                return Err(SearchError::InvalidState(format!("tile {} appears twice", tile)));
            }
            *slot = true;
        }
        Ok(PuzzleState { tiles })
    }

    /// Builds a state from a slice, which must hold exactly nine tiles.
    pub fn from_slice(tiles: &[u8]) -> Result<Self, SearchError> {
        let tiles: [u8; CELLS] = tiles.try_into().map_err(|_| {
            SearchError::InvalidState(format!("expected {} tiles, found {}", CELLS, tiles.len()))
        })?;
        Self::new(tiles)
    }

    pub fn goal() -> Self {
        PuzzleState { tiles: GOAL }
    }

    /// The identity of this state: its tiles in reading order.
    pub fn key(&self) -> [u8; CELLS] {
        self.tiles
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Index of the blank cell.
    pub fn blank(&self) -> usize {
        // `new` guarantees exactly one zero.
        self.tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Number of pairs of non-blank tiles that appear in the opposite order to `GOAL`.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether `GOAL` is reachable from this state (even inversion count).
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// Moves the blank can make without leaving the board, in `Move::ALL` order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let blank = self.blank();
        Move::ALL
            .into_iter()
            .filter(|&m| Self::target(blank, m).is_some())
            .collect()
    }

    /// The state after sliding the blank in direction `m`, or `None` if it would leave the board.
    pub fn apply(&self, m: Move) -> Option<Self> {
        let blank = self.blank();
        let target = Self::target(blank, m)?;
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Some(PuzzleState { tiles })
    }

    fn target(blank: usize, m: Move) -> Option<usize> {
        let (dr, dc) = m.offset();
        let row = (blank / SIDE) as isize + dr;
        let col = (blank % SIDE) as isize + dc;
        let side = SIDE as isize;
        if (0..side).contains(&row) && (0..side).contains(&col) {
            Some(row as usize * SIDE + col as usize)
        } else {
            None
        }
    }

    /// A uniformly random solvable state: shuffles `0..=8` until the parity check passes.
    pub fn random_solvable(rng: &mut impl Rng) -> Self {
        loop {
            let mut tiles = GOAL;
            tiles.shuffle(rng);
            let state = PuzzleState { tiles };
            if state.is_solvable() {
                return state;
            }
        }
    }

    /// Reproducible variant of `random_solvable`.
    pub fn random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::random_solvable(&mut rng)
    }
}

/// A random solvable state drawn from the thread-local generator.
pub fn create_random_solvable_state() -> PuzzleState {
    PuzzleState::random_solvable(&mut rand::thread_rng())
}

impl fmt::Display for PuzzleState {
    /// Three rows of three tiles, blank shown as `_`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.tiles.chunks(SIDE).enumerate() {
            let line: Vec<String> = cells
                .iter()
                .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                .collect();
            write!(f, "{}", line.join(" "))?;
            if row < SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for PuzzleState {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::state_from_str(s)
    }
}

/// The 8-puzzle as a search problem: unit step cost, fixed `GOAL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    initial: PuzzleState,
}

impl Puzzle {
    pub fn new(initial: PuzzleState) -> Self {
        Puzzle { initial }
    }
}

impl Problem for Puzzle {
    type State = PuzzleState;
    type Action = Move;

    fn initial_state(&self) -> PuzzleState {
        self.initial
    }

    fn is_goal(&self, state: &PuzzleState) -> bool {
        state.tiles == GOAL
    }

    fn actions(&self, state: &PuzzleState) -> Vec<Move> {
        state.legal_moves()
    }

    fn result(&self, state: &PuzzleState, action: Move) -> Option<PuzzleState> {
        state.apply(action)
    }
}

/// Manages a manual-play session on one board.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Game, PuzzleState};
///
/// let start: PuzzleState = "1 2 3 4 5 6 7 _ 8".parse().unwrap();
/// let mut game = Game::new(start);
/// assert!(!game.press_tile(0)); // not next to the blank
/// assert!(game.press_tile(8));  // slides the 8 left
/// assert!(game.is_solved());
/// assert!(game.undo_last_move());
/// assert_eq!(game.state(), start);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    state: PuzzleState,
    moves: u32,
    history: Vec<PuzzleState>,
}

impl Game {
    pub fn new(initial: PuzzleState) -> Self {
        Game {
            state: initial,
            moves: 0,
            history: vec![initial],
        }
    }

    /// Starts a session on a random solvable board.
    pub fn new_random(rng: &mut impl Rng) -> Self {
        Game::new(PuzzleState::random_solvable(rng))
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// Number of moves made (undone moves are not counted).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.state.tiles == GOAL
    }

    /// Slides the blank in direction `m`.
    pub fn apply_move(&mut self, m: Move) -> Result<(), SearchError> {
        let next = self.state.apply(m).ok_or(SearchError::IllegalMove(m))?;
        self.state = next;
        self.moves += 1;
        self.history.push(next);
        log::trace!("manual move {} -> {:?}", m, next.key());
        Ok(())
    }

    /// Slides the tile at `index` into the blank.
    ///
    /// # Returns
    /// `true` if the tile was orthogonally adjacent to the blank and moved,
    /// `false` otherwise (including an out-of-range index or pressing the blank).
    pub fn press_tile(&mut self, index: usize) -> bool {
        if index >= CELLS {
            return false;
        }
        let blank = self.state.blank();
        Move::ALL
            .into_iter()
            .find(|&m| PuzzleState::target(blank, m) == Some(index))
            .map_or(false, |m| self.apply_move(m).is_ok())
    }

    /// Restores the board before the last move.
    ///
    /// # Returns
    /// `false` if no move has been made yet.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            if let Some(&previous) = self.history.last() {
                self.state = previous;
                self.moves -= 1;
                return true;
            }
        }
        false
    }

    /// Runs `algorithm` from the current board.
    pub fn solve(
        &self,
        algorithm: Algorithm,
        options: &SolveOptions<'_, PuzzleState>,
    ) -> Result<SearchOutcome<PuzzleState, Move>, SearchError> {
        solve_from(&Puzzle::new(self.state), self.state, algorithm, options)
    }
}
