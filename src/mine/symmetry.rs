//! Symmetries of a reference grid used to deduplicate mined puzzles.
//!
//! A symmetry maps each cell of the reference grid to another cell so that
//! the whole grid is carried onto a symbol relabelling of itself. Two clue
//! sets related by a symmetry make the same puzzle.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::collections::square::{Coord, SquareIndex};
use crate::grid::{Grid, Value};

/// Which symmetries to deduplicate by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// Every sorted set of positions is distinct
    None,
    /// A puzzle and its transpose are the same
    Transpose,
    /// Row and column permutations that preserve the grid, with or without transposing
    Isotopy,
}

impl Symmetry {
    pub const ALL: [Symmetry; 3] = [Symmetry::None, Symmetry::Transpose, Symmetry::Isotopy];

    pub fn name(self) -> &'static str {
        match self {
            Symmetry::None => "none",
            Symmetry::Transpose => "transpose",
            Symmetry::Isotopy => "isotopy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

impl Default for Symmetry {
    fn default() -> Self {
        Symmetry::Transpose
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cell maps of the symmetries of one reference grid, the identity included
pub struct SymmetryGroup {
    maps: Vec<Vec<SquareIndex>>,
}

impl SymmetryGroup {
    pub fn identity(size: usize) -> Self {
        Self {
            maps: vec![(0..size.pow(2)).collect()],
        }
    }

    pub fn new(symmetry: Symmetry, reference: &Grid) -> Self {
        let size = reference.width();
        let mut maps = Self::identity(size).maps;
        match symmetry {
            Symmetry::None => {}
            Symmetry::Transpose => {
                if is_relabelling(reference, &reference.transpose()) {
                    maps.push(cell_map(size, |coord| coord.transpose()));
                }
            }
            Symmetry::Isotopy => {
                for (rows, cols) in isotopisms(reference, reference) {
                    maps.push(cell_map(size, |coord| {
                        Coord::new(rows[coord.row()], cols[coord.col()])
                    }));
                }
                // a cell (r, c) of the reference is cell (c, r) of its transpose
                for (rows, cols) in isotopisms(&reference.transpose(), reference) {
                    maps.push(cell_map(size, |coord| {
                        Coord::new(rows[coord.col()], cols[coord.row()])
                    }));
                }
                maps.sort();
                maps.dedup();
            }
        }
        if symmetry != Symmetry::None && maps.len() == 1 {
            warn!("{} symmetry does not apply to the reference grid", symmetry);
        }
        debug!("{} symmetry group has {} elements", symmetry, maps.len());
        Self { maps }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// True if the group holds only the identity
    pub fn is_trivial(&self) -> bool {
        self.maps.len() == 1
    }

    /// The lexicographically smallest sorted image of `positions`
    pub fn canonical(&self, positions: &[SquareIndex]) -> Vec<SquareIndex> {
        self.maps
            .iter()
            .map(|map| {
                let mut image: Vec<_> = positions.iter().map(|&p| map[p]).collect();
                image.sort_unstable();
                image
            })
            .min()
            .unwrap_or_default()
    }
}

fn cell_map(size: usize, mut f: impl FnMut(Coord) -> Coord) -> Vec<SquareIndex> {
    (0..size.pow(2))
        .map(|i| f(Coord::new(i / size, i % size)).index(size))
        .collect()
}

/// True if some bijection of symbols carries `from` onto `to`
fn is_relabelling(from: &Grid, to: &Grid) -> bool {
    let mut symbols = vec![None; from.width() + 1];
    from.iter().zip(to.iter()).all(|(&a, &b)| {
        let symbol = &mut symbols[usize::from(a)];
        *symbol.get_or_insert(b) == b
    })
}

/// Every pair of row and column permutations `(rows, cols)` for which
/// `to[rows[i]][cols[j]]` is a fixed relabelling of `from[i][j]`.
///
/// Both grids must be Latin squares of the same size.
fn isotopisms(from: &Grid, to: &Grid) -> Vec<(Vec<usize>, Vec<usize>)> {
    let size = from.width();
    let mut found = Vec::new();
    for cols in (0..size).permutations(size) {
        for first_row in 0..size {
            if let Some(rows) = row_permutation(from, to, first_row, &cols) {
                found.push((rows, cols.clone()));
            }
        }
    }
    found
}

/// Completes an isotopism from the image of row 0 and the column permutation.
///
/// Row 0 fixes the symbol relabelling and column 0 then fixes every other row.
fn row_permutation(from: &Grid, to: &Grid, first_row: usize, cols: &[usize]) -> Option<Vec<usize>> {
    let size = from.width();
    let mut relabel: Vec<Value> = vec![0; size + 1];
    for (j, &col) in cols.iter().enumerate() {
        relabel[usize::from(from[Coord::new(0, j)])] = to[Coord::new(first_row, col)];
    }
    let mut rows = Vec::with_capacity(size);
    for i in 0..size {
        let target = relabel[usize::from(from[Coord::new(i, 0)])];
        let row = (0..size).find(|&r| to[Coord::new(r, cols[0])] == target)?;
        let matches = cols
            .iter()
            .enumerate()
            .all(|(j, &col)| to[Coord::new(row, col)] == relabel[usize::from(from[Coord::new(i, j)])]);
        if !matches {
            return None;
        }
        rows.push(row);
    }
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::cyclic_latin_square;
    use crate::grid::grid_from_rows;

    #[test]
    fn names() {
        for &symmetry in &Symmetry::ALL {
            assert_eq!(Some(symmetry), Symmetry::from_name(symmetry.name()));
        }
        assert_eq!(None, Symmetry::from_name("rotate"));
        assert_eq!(Symmetry::Transpose, Symmetry::default());
    }

    #[test]
    fn none_keeps_positions() {
        let group = SymmetryGroup::new(Symmetry::None, &cyclic_latin_square(4));
        assert!(group.is_trivial());
        assert_eq!(vec![1, 4], group.canonical(&[4, 1]));
    }

    #[test]
    fn transpose_of_cyclic() {
        let group = SymmetryGroup::new(Symmetry::Transpose, &cyclic_latin_square(4));
        assert_eq!(2, group.len());
        // (1, 0) and (2, 3) transpose to (0, 1) and (3, 2)
        assert_eq!(vec![1, 14], group.canonical(&[4, 11]));
        assert_eq!(vec![1, 14], group.canonical(&[1, 14]));
    }

    #[test]
    fn transpose_needs_relabelling() {
        // the transpose of this square is not a relabelling of it
        let grid = grid_from_rows(vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![4, 3, 2, 1],
            vec![2, 1, 4, 3],
        ])
        .unwrap();
        assert!(!is_relabelling(&grid, &grid.transpose()));
        assert!(SymmetryGroup::new(Symmetry::Transpose, &grid).is_trivial());
    }

    #[test]
    fn autotopisms_of_cyclic() {
        // the cyclic group of order 4 has 4 * 4 * |Aut(Z4)| = 32 autotopisms
        let grid = cyclic_latin_square(4);
        assert_eq!(32, isotopisms(&grid, &grid).len());
        let group = SymmetryGroup::new(Symmetry::Isotopy, &grid);
        assert_eq!(64, group.len());
    }

    #[test]
    fn isotopy_maps_are_symmetries() {
        let grid = cyclic_latin_square(5);
        let group = SymmetryGroup::new(Symmetry::Isotopy, &grid);
        for map in &group.maps {
            let image = Grid::from_fn(5, |coord| grid[map[coord.index(5)]]);
            assert!(is_relabelling(&grid, &image));
        }
    }

    #[test]
    fn canonical_is_invariant() {
        let group = SymmetryGroup::new(Symmetry::Isotopy, &cyclic_latin_square(4));
        let positions = [0, 5, 10];
        let canonical = group.canonical(&positions);
        for map in &group.maps {
            let image: Vec<_> = positions.iter().map(|&p| map[p]).collect();
            assert_eq!(canonical, group.canonical(&image));
        }
    }
}
