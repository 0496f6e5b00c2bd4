//! Latin square grids and supported grid sizes

use std::ops::RangeInclusive;

use crate::collections::square::{Coord, IsSquare, SquareIndex};
use crate::collections::Square;
use crate::error::{InvalidInput, Result};

/// A value in a grid cell, in `1..=size`
pub type Value = u8;

/// An N×N grid of values
pub type Grid = Square<Value>;

pub const MIN_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 9;

pub const GRID_SIZES: RangeInclusive<usize> = MIN_GRID_SIZE..=MAX_GRID_SIZE;

/// Rejects grid sizes outside of `GRID_SIZES`
pub fn check_grid_size(size: usize) -> Result<usize, InvalidInput> {
    if GRID_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(InvalidInput::GridSize(size))
    }
}

/// Rejects flattened positions outside of a grid of the given size
pub fn check_positions(size: usize, positions: &[SquareIndex]) -> Result<(), InvalidInput> {
    let cells = size.pow(2);
    match positions.iter().find(|&&p| p >= cells) {
        Some(&position) => Err(InvalidInput::Position { position, cells }),
        None => Ok(()),
    }
}

/// Builds a grid from rows of values
pub fn grid_from_rows(rows: Vec<Vec<Value>>) -> Result<Grid, InvalidInput> {
    Square::from_rows(rows).map_err(|e| InvalidInput::GridShape(e.0))
}

/// Coordinates of the cells where two grids of the same width hold the same value
pub fn matching_cells(a: &Grid, b: &Grid) -> Vec<Coord> {
    assert_eq!(a.width(), b.width(), "grids must be the same size");
    (0..a.len())
        .filter(|&i| a[i] == b[i])
        .map(|i| a.coord_at(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sizes() {
        assert!(check_grid_size(3).is_err());
        assert_eq!(4, check_grid_size(4).unwrap());
        assert_eq!(9, check_grid_size(9).unwrap());
        assert!(check_grid_size(10).is_err());
    }

    #[test]
    fn positions_out_of_range() {
        assert!(check_positions(4, &[0, 15]).is_ok());
        assert_eq!(
            Err(InvalidInput::Position {
                position: 16,
                cells: 16
            }),
            check_positions(4, &[3, 16])
        );
    }

    #[test]
    fn matching() {
        let a = grid_from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap();
        let b = grid_from_rows(vec![vec![1, 2], vec![1, 2]]).unwrap();
        assert_eq!(vec![Coord::new(0, 0), Coord::new(0, 1)], matching_cells(&a, &b));
    }
}
