use crate::engine::{PuzzleState, CELLS};
use crate::error::SearchError;

/// Parses a tile layout written in reading order into a `PuzzleState`.
///
/// Each tile is a single character:
/// - '1'..='8': the numbered tiles
/// - '0', '_' or '.': the blank
///
/// Whitespace and commas between tiles are ignored, so `"123456780"`,
/// `"1 2 3 4 5 6 7 8 _"` and `"1,2,3,4,5,6,7,8,0"` all describe the goal.
///
/// # Returns
/// * `Ok(PuzzleState)` if the input holds exactly nine tiles forming a permutation of 0..=8.
/// * `Err(SearchError::InvalidState)` if:
///     - A character other than a tile, whitespace or comma is encountered.
///     - The number of tiles is not nine.
///     - A tile appears more than once.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::state_from_str;
/// use eight_puzzle_solver::engine::PuzzleState;
///
/// let goal = state_from_str("1 2 3 / 4 5 6 / 7 8 _");
/// assert!(goal.is_err()); // '/' is not a separator
///
/// let goal = state_from_str("1,2,3, 4,5,6, 7,8,_").unwrap();
/// assert_eq!(goal, PuzzleState::goal());
///
/// assert!(state_from_str("12345678").is_err()); // only eight tiles
/// assert!(state_from_str("123456788").is_err()); // duplicate 8
/// ```
pub fn state_from_str(s: &str) -> Result<PuzzleState, SearchError> {
    let mut tiles = Vec::with_capacity(CELLS);

    for (pos, ch) in s.chars().enumerate() {
        match ch {
            '_' | '.' => tiles.push(0),
            '0'..='8' => tiles.push(ch as u8 - b'0'),
            ',' => {}
            c if c.is_whitespace() => {}
            _ => {
                return Err(SearchError::InvalidState(format!(
                    "unrecognized character '{}' at position {}",
                    ch, pos
                )))
            }
        }
    }

    PuzzleState::from_slice(&tiles)
}
