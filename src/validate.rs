//! Latin square validation and guess feedback

use std::collections::BTreeSet;

use crate::collections::square::{Coord, IsSquare, SquareIndex, VectorId};
use crate::grid::{matching_cells, Grid};

/// Finds every cell that shares its value with another cell in the same row or column.
///
/// Values outside of `1..=width` are reported as well.
/// The result is sorted in row-major order.
pub fn find_violations(grid: &Grid) -> Vec<Coord> {
    let width = grid.width();
    let mut violations = BTreeSet::new();
    // counts[v] is the number of times v occurs in the current vector
    let mut counts = vec![0_usize; width + 1];
    for vector_id in VectorId::all(width) {
        counts.iter_mut().for_each(|c| *c = 0);
        for &value in grid.vector(vector_id) {
            if let Some(count) = counts.get_mut(usize::from(value)) {
                *count += 1;
            }
        }
        for (position, &value) in grid.vector(vector_id).enumerate() {
            let value = usize::from(value);
            if value == 0 || value > width || counts[value] > 1 {
                violations.insert(vector_id.coord(position));
            }
        }
    }
    violations.into_iter().collect()
}

/// Returns true if every row and column is a permutation of `1..=width`
pub fn is_valid(grid: &Grid) -> bool {
    let width = grid.width();
    let mut seen = vec![false; width + 1];
    VectorId::all(width).all(|vector_id| {
        seen.iter_mut().for_each(|s| *s = false);
        grid.vector(vector_id).all(|&value| {
            let value = usize::from(value);
            if value == 0 || value > width || seen[value] {
                return false;
            }
            seen[value] = true;
            true
        })
    })
}

/// Returns true if `grid` is a Latin square
pub fn check_latin_square(grid: &Grid) -> bool {
    is_valid(grid)
}

/// Cells that break the Latin property as sorted `(row, col)` pairs
pub fn find_latin_square_violations(grid: &Grid) -> Vec<(usize, usize)> {
    find_violations(grid).into_iter().map(Into::into).collect()
}

/// The result of comparing a guess with the solution
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    correct: Vec<SquareIndex>,
    wrong: Vec<SquareIndex>,
}

impl Feedback {
    pub fn compare(guess: &Grid, solution: &Grid) -> Self {
        let width = guess.width();
        let correct: Vec<_> = matching_cells(guess, solution)
            .into_iter()
            .map(|coord| coord.index(width))
            .collect();
        let mut correct_iter = correct.iter().peekable();
        let wrong = (0..guess.len())
            .filter(|&i| {
                if correct_iter.peek() == Some(&&i) {
                    correct_iter.next();
                    false
                } else {
                    true
                }
            })
            .collect();
        Self { correct, wrong }
    }

    /// Positions where the guess matches the solution, ascending
    pub fn correct(&self) -> &[SquareIndex] {
        &self.correct
    }

    /// Positions where the guess differs from the solution, ascending
    pub fn wrong(&self) -> &[SquareIndex] {
        &self.wrong
    }

    pub fn is_solved(&self) -> bool {
        self.wrong.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::cyclic_latin_square;
    use crate::grid::grid_from_rows;

    #[test]
    fn cyclic_has_no_violations() {
        let grid = cyclic_latin_square(5);
        assert!(find_violations(&grid).is_empty());
        assert!(is_valid(&grid));
    }

    #[test]
    fn row_duplicate() {
        // row 0 becomes 1 1 3 4, which also puts a second 1 in column 1
        let mut grid = cyclic_latin_square(4);
        grid[Coord::new(0, 1)] = 1;
        let expected = vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(3, 1),
        ];
        assert_eq!(expected, find_violations(&grid));
        assert!(!is_valid(&grid));
    }

    #[test]
    fn column_duplicate_only() {
        // swapping two values within a row keeps the row valid but breaks two columns
        let mut grid = cyclic_latin_square(4);
        grid.swap(Coord::new(0, 0), Coord::new(0, 1));
        let violations = find_violations(&grid);
        assert_eq!(
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(3, 1),
            ],
            violations
        );
    }

    #[test]
    fn out_of_range_value() {
        let grid = grid_from_rows(vec![vec![1, 2], vec![2, 3]]).unwrap();
        assert_eq!(vec![Coord::new(1, 1)], find_violations(&grid));
        assert!(!check_latin_square(&grid));
        assert_eq!(vec![(1, 1)], find_latin_square_violations(&grid));
    }

    #[test]
    fn feedback() {
        let solution = grid_from_rows(vec![vec![2, 1], vec![1, 2]]).unwrap();
        let guess = grid_from_rows(vec![vec![2, 1], vec![2, 1]]).unwrap();
        let feedback = Feedback::compare(&guess, &solution);
        assert_eq!(&[0, 1], feedback.correct());
        assert_eq!(&[2, 3], feedback.wrong());
        assert!(!feedback.is_solved());
        assert!(Feedback::compare(&solution, &solution).is_solved());
    }
}
