//! Decide whether a set of correct cells determines a Latin square

pub use self::constraints::Constraints;
pub use self::search::{complete, search, SearchOutcome, SearchResult};
pub use self::value_set::ValueSet;

mod constraints;
mod search;
mod value_set;

use crate::collections::square::{IsSquare, SquareIndex};
use crate::error::{InvalidInput, Result};
use crate::grid::{check_grid_size, Grid};

/// The outcome of a uniqueness check
#[derive(Clone, Debug, PartialEq)]
pub struct Uniqueness {
    /// True if exactly one Latin square is consistent with the clues
    pub unique: bool,
    /// Completions found before the search stopped, at most 2
    pub solutions_found: usize,
    /// The completion, if it is unique
    pub solution: Option<Grid>,
    /// Cells where the search had to guess
    pub branches: u64,
}

/// Checks whether `positions` of `reference`, marked correct, determine a unique Latin square.
///
/// Every cell not in `positions` is known to differ from `reference`, so
/// some sets of clues have no completion at all. Those are not unique.
/// The search stops at the second completion.
pub fn has_unique_solution(
    size: usize,
    positions: &[SquareIndex],
    reference: &Grid,
) -> Result<Uniqueness> {
    check_grid_size(size)?;
    if reference.width() != size {
        return Err(InvalidInput::NotLatin(size).into());
    }
    if positions.len() >= reference.len() {
        return Err(InvalidInput::PlacedCount {
            placed: positions.len(),
            cells: reference.len(),
        }
        .into());
    }
    let constraints = Constraints::from_clues(reference, positions)?;
    let outcome = search(&constraints, 2);
    let branches = outcome.branches();
    let solutions_found = outcome.solutions().len();
    let solution = match outcome.result() {
        SearchResult::SingleSolution(solution) => Some(solution),
        SearchResult::NoSolutions | SearchResult::MultipleSolutions => None,
    };
    Ok(Uniqueness {
        unique: solution.is_some(),
        solutions_found,
        solution,
        branches,
    })
}
