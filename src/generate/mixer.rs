//! Intercalate flips, the moves of the Jacobson-Matthews chain restricted to proper squares

use crate::collections::square::Coord;
use crate::grid::Grid;
use crate::rng::SeededRng;

/// Steps of mixing needed to approximate a uniform draw, found empirically
pub fn default_burn_in_steps(size: usize) -> usize {
    50 * size.pow(2)
}

/// Applies `steps` random intercalate flips to a Latin square
pub fn mix(grid: Grid, rng: &mut SeededRng, steps: usize) -> Grid {
    let mut mixer = Mixer::new(grid);
    let flips = (0..steps).filter(|_| mixer.step(rng)).count();
    trace!("{} of {} mixing steps flipped an intercalate", flips, steps);
    mixer.into_grid()
}

/// Walks a Latin square through the intercalate flip Markov chain.
///
/// Every state of the walk is a Latin square.
pub struct Mixer {
    grid: Grid,
    indices: Vec<usize>,
}

impl Mixer {
    pub fn new(grid: Grid) -> Self {
        let indices = (0..grid.width()).collect();
        Self { grid, indices }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Picks two distinct rows and two distinct columns and flips the 2×2
    /// submatrix if it is an intercalate `[[a, b], [b, a]]`.
    ///
    /// Returns true if the grid changed.
    pub fn step(&mut self, rng: &mut SeededRng) -> bool {
        let rows = rng.sample(&self.indices, 2);
        let cols = rng.sample(&self.indices, 2);
        let (r1, r2, c1, c2) = (rows[0], rows[1], cols[0], cols[1]);
        let a = self.grid[Coord::new(r1, c1)];
        let b = self.grid[Coord::new(r1, c2)];
        if a == b || self.grid[Coord::new(r2, c1)] != b || self.grid[Coord::new(r2, c2)] != a {
            return false;
        }
        self.grid[Coord::new(r1, c1)] = b;
        self.grid[Coord::new(r1, c2)] = a;
        self.grid[Coord::new(r2, c1)] = a;
        self.grid[Coord::new(r2, c2)] = b;
        true
    }
}
