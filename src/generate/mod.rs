//! Latin square construction

mod builder;
mod mixer;

pub use self::builder::random_latin_square;
pub use self::mixer::{default_burn_in_steps, mix, Mixer};

use crate::collections::Square;
use crate::error::Result;
use crate::grid::{check_grid_size, Grid, Value};
use crate::rng::SeededRng;

/// Creates the cyclic Latin square: `grid[i][j] = (i + j) mod size + 1`.
///
/// This is the starting grid of every game, independent of the solution seed.
///
/// # Panics
/// Panics if `size` is zero or does not fit in a `Value`.
pub fn cyclic_latin_square(size: usize) -> Grid {
    assert!(size > 0 && size <= usize::from(Value::MAX), "invalid size {}", size);
    Square::from_fn(size, |coord| ((coord.row() + coord.col()) % size + 1) as Value)
}

/// Generates an approximately uniform Latin square.
///
/// One generator seeded with `seed` drives the backtracking builder and then
/// `burn_in_steps` intercalate flips (`default_burn_in_steps` if `None`).
/// The same `(size, seed, burn_in_steps)` always yields the same grid.
pub fn uniform_random_latin_square(
    size: usize,
    seed: u64,
    burn_in_steps: Option<usize>,
) -> Result<Grid> {
    mixed_latin_square(size, &mut SeededRng::new(seed), burn_in_steps)
}

/// Like `uniform_random_latin_square`, drawing from a generator the caller owns
pub fn mixed_latin_square(
    size: usize,
    rng: &mut SeededRng,
    burn_in_steps: Option<usize>,
) -> Result<Grid> {
    check_grid_size(size)?;
    let grid = random_latin_square(size, rng)?;
    let steps = burn_in_steps.unwrap_or_else(|| default_burn_in_steps(size));
    debug!(
        "Mixing Latin square (size={}, seed={}, steps={})",
        size,
        rng.seed(),
        steps
    );
    Ok(mix(grid, rng, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GRID_SIZES;
    use crate::validate::is_valid;

    #[test]
    fn cyclic() {
        let expected =
            crate::grid::grid_from_rows(vec![vec![1, 2, 3], vec![2, 3, 1], vec![3, 1, 2]]).unwrap();
        assert_eq!(expected, cyclic_latin_square(3));
        for size in 1..=12 {
            assert!(is_valid(&cyclic_latin_square(size)), "size {}", size);
        }
    }

    #[test]
    fn uniform_is_deterministic() {
        for size in GRID_SIZES {
            let a = uniform_random_latin_square(size, 1234, None).unwrap();
            let b = uniform_random_latin_square(size, 1234, None).unwrap();
            assert_eq!(a, b);
            assert!(is_valid(&a));
        }
    }

    #[test]
    fn shared_generator_keeps_drawing() {
        let mut rng = SeededRng::new(77);
        let first = mixed_latin_square(5, &mut rng, None).unwrap();
        assert_eq!(uniform_random_latin_square(5, 77, None).unwrap(), first);
        let second = mixed_latin_square(5, &mut rng, None).unwrap();
        assert!(is_valid(&second));
    }

    #[test]
    fn uniform_rejects_unsupported_size() {
        assert!(uniform_random_latin_square(3, 1, None).is_err());
        assert!(uniform_random_latin_square(10, 1, None).is_err());
    }
}
