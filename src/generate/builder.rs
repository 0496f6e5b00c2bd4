use crate::collections::square::{Coord, IsSquare, SquareIndex};
use crate::error::{Error, Result};
use crate::grid::{check_grid_size, Grid, Value};
use crate::rng::SeededRng;
use crate::solve::ValueSet;

/// Builds a random Latin square by backtracking over cells in row-major order.
///
/// The candidate values of each cell are shuffled with `rng`, so the result
/// is a function of the generator state.
pub fn random_latin_square(size: usize, rng: &mut SeededRng) -> Result<Grid> {
    check_grid_size(size)?;
    let mut builder = Builder {
        grid: Grid::with_width(size),
        row_used: vec![ValueSet::new(); size],
        col_used: vec![ValueSet::new(); size],
        full: ValueSet::with_all(size),
        rng,
        nodes: 0,
    };
    if !builder.fill(0) {
        return Err(Error::ConstructionFailure { size });
    }
    debug!(
        "Built Latin square of size {} in {} nodes",
        size, builder.nodes
    );
    Ok(builder.grid)
}

struct Builder<'a> {
    grid: Grid,
    row_used: Vec<ValueSet>,
    col_used: Vec<ValueSet>,
    full: ValueSet,
    rng: &'a mut SeededRng,
    nodes: u64,
}

impl Builder<'_> {
    fn fill(&mut self, index: SquareIndex) -> bool {
        self.nodes += 1;
        if index == self.grid.len() {
            return true;
        }
        let coord = self.grid.coord_at(index);
        let used = self.row_used[coord.row()].union(self.col_used[coord.col()]);
        let mut candidates: Vec<Value> = self.full.difference(used).iter().collect();
        self.rng.shuffle(&mut candidates);
        for value in candidates {
            self.place(coord, value);
            if self.fill(index + 1) {
                return true;
            }
            self.unplace(coord, value);
        }
        false
    }

    fn place(&mut self, coord: Coord, value: Value) {
        self.grid[coord] = value;
        self.row_used[coord.row()].insert(value);
        self.col_used[coord.col()].insert(value);
    }

    fn unplace(&mut self, coord: Coord, value: Value) {
        self.grid[coord] = 0;
        self.row_used[coord.row()].remove(value);
        self.col_used[coord.col()].remove(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GRID_SIZES;
    use crate::validate::is_valid;

    #[test]
    fn builds_valid_squares() {
        for size in GRID_SIZES {
            for seed in 1..50 {
                let mut rng = SeededRng::new(seed);
                let grid = random_latin_square(size, &mut rng).unwrap();
                assert!(is_valid(&grid), "size {} seed {}\n{}", size, seed, grid);
            }
        }
    }

    #[test]
    fn same_seed_same_square() {
        let a = random_latin_square(7, &mut SeededRng::new(5)).unwrap();
        let b = random_latin_square(7, &mut SeededRng::new(5)).unwrap();
        let c = random_latin_square(7, &mut SeededRng::new(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unsupported_size() {
        let result = random_latin_square(2, &mut SeededRng::new(1));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
