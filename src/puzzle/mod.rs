//! Sudodle puzzles: the cells marked correct on the first guess

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub use self::encode::{decode_puzzle, encode_puzzle, position_width};

use crate::collections::square::{Coord, SquareIndex};
use crate::error::{InvalidInput, ParseDifficultyError, ParsePuzzleError};
use crate::grid::{check_grid_size, check_positions};

mod encode;
pub mod store;

/// The most solver branches a puzzle may need to be graded hard
pub const HARD_MAX_BRANCHES: u64 = 4;

/// The positions of the correct cells of a guess, for a grid of a given size
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Puzzle {
    size: usize,
    positions: Vec<SquareIndex>,
}

impl Puzzle {
    /// Creates a puzzle. Positions are sorted and duplicates are removed.
    pub fn new(size: usize, mut positions: Vec<SquareIndex>) -> Result<Self, InvalidInput> {
        check_grid_size(size)?;
        check_positions(size, &positions)?;
        positions.sort_unstable();
        positions.dedup();
        let cells = size.pow(2);
        if positions.len() >= cells {
            return Err(InvalidInput::PlacedCount {
                placed: positions.len(),
                cells,
            });
        }
        Ok(Self { size, positions })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Flattened row-major cell indices, ascending
    pub fn positions(&self) -> &[SquareIndex] {
        &self.positions
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        self.positions
            .iter()
            .map(move |&i| Coord::new(i / size, i % size))
    }

    /// The compact identifier of the puzzle
    pub fn id(&self) -> String {
        encode_puzzle(self)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for Puzzle {
    type Err = ParsePuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_puzzle(s)
    }
}

/// How hard a puzzle is to solve by hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    /// Solvable by propagation alone
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::Expert];

    /// Grades a puzzle by the number of guesses the solver made
    pub fn from_branches(branches: u64) -> Self {
        match branches {
            0 => Difficulty::Normal,
            b if b <= HARD_MAX_BRANCHES => Difficulty::Hard,
            _ => Difficulty::Expert,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// A mined puzzle with its difficulty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleRecord {
    pub puzzle: Puzzle,
    pub difficulty: Difficulty,
}

impl PuzzleRecord {
    pub fn new(puzzle: Puzzle, difficulty: Difficulty) -> Self {
        Self { puzzle, difficulty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_positions() {
        let puzzle = Puzzle::new(4, vec![5, 0, 5]).unwrap();
        assert_eq!(&[0, 5], puzzle.positions());
        assert_eq!(
            vec![Coord::new(0, 0), Coord::new(1, 1)],
            puzzle.coords().collect::<Vec<_>>()
        );
    }

    #[test]
    fn new_rejects_bad_input() {
        assert_eq!(Err(InvalidInput::GridSize(10)), Puzzle::new(10, vec![0]));
        assert_eq!(
            Err(InvalidInput::Position {
                position: 16,
                cells: 16
            }),
            Puzzle::new(4, vec![16])
        );
        assert_eq!(
            Err(InvalidInput::PlacedCount {
                placed: 16,
                cells: 16
            }),
            Puzzle::new(4, (0..16).collect())
        );
    }

    #[test]
    fn difficulty_from_branches() {
        assert_eq!(Difficulty::Normal, Difficulty::from_branches(0));
        assert_eq!(Difficulty::Hard, Difficulty::from_branches(1));
        assert_eq!(Difficulty::Hard, Difficulty::from_branches(HARD_MAX_BRANCHES));
        assert_eq!(Difficulty::Expert, Difficulty::from_branches(HARD_MAX_BRANCHES + 1));
    }

    #[test]
    fn difficulty_names() {
        for &difficulty in &Difficulty::ALL {
            assert_eq!(Ok(difficulty), difficulty.to_string().parse());
        }
        assert_eq!(
            Err(ParseDifficultyError("easy".to_string())),
            "easy".parse::<Difficulty>()
        );
        assert!(Difficulty::Normal < Difficulty::Hard);
        assert!(Difficulty::Hard < Difficulty::Expert);
    }
}
