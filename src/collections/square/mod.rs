mod coord;
mod vector;

pub use self::coord::Coord;
pub use self::vector::Dimension;
pub use self::vector::VectorId;

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::StepBy;
use std::ops::{Deref, Index, IndexMut, Range};

use thiserror::Error;

/// Flattened row-major index of an element in a `Square`
pub type SquareIndex = usize;

type VectorIndices = StepBy<Range<SquareIndex>>;

pub trait IsSquare {
    fn len(&self) -> usize {
        self.width().pow(2)
    }

    fn col_at(&self, index: SquareIndex) -> usize {
        assert!(index < self.len());
        index % self.width()
    }

    fn row_at(&self, index: SquareIndex) -> usize {
        assert!(index < self.len());
        index / self.width()
    }

    fn coord_at(&self, index: SquareIndex) -> Coord {
        Coord::new(self.row_at(index), self.col_at(index))
    }

    fn vector_indices(&self, vector_id: VectorId) -> VectorIndices {
        assert!(vector_id.index() < self.width());
        let width = self.width();
        let (start, end, step) = match vector_id.dimension() {
            Dimension::Row => (width * vector_id.index(), width * (vector_id.index() + 1), 1),
            Dimension::Col => (vector_id.index(), vector_id.index() + self.len(), width),
        };
        (start..end).step_by(step)
    }

    fn width(&self) -> usize;
}

/// A container of elements represented in a square grid
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Square<T> {
    width: usize,
    elements: Vec<T>,
}

impl<T> Square<T> {
    /// Creates a new square with a specified width and fill with the default value
    pub fn with_width(width: usize) -> Square<T>
    where
        T: Clone + Default,
    {
        Self::with_width_and_value(width, T::default())
    }

    /// Create a new `Square` of a specified width and fill with a specified value
    pub fn with_width_and_value(width: usize, val: T) -> Square<T>
    where
        T: Clone,
    {
        Square {
            width,
            elements: vec![val; width.pow(2)],
        }
    }

    /// Creates a square by calling `f` with the coordinate of every element
    pub fn from_fn(width: usize, mut f: impl FnMut(Coord) -> T) -> Square<T> {
        let elements = (0..width.pow(2))
            .map(|i| f(Coord::new(i / width, i % width)))
            .collect();
        Square { width, elements }
    }

    /// Creates a square from a list of rows
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Square<T>, NonSquareLength> {
        let width = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(NonSquareLength(width * row.len()));
        }
        let elements = rows.into_iter().flatten().collect();
        Ok(Square { width, elements })
    }

    /// Returns the width (and height) of the grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns an iterator over the rows of the square
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.width)
    }

    /// Returns an iterator over the elements of a row or column
    pub fn vector(&self, vector_id: VectorId) -> impl Iterator<Item = &T> + '_ {
        self.vector_indices(vector_id).map(move |i| &self.elements[i])
    }

    /// Returns a copy of the square reflected across its main diagonal
    pub fn transpose(&self) -> Square<T>
    where
        T: Clone,
    {
        Square::from_fn(self.width, |coord| self[coord.transpose()].clone())
    }

    /// Swaps two elements
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let (a, b) = (a.index(self.width), b.index(self.width));
        self.elements.swap(a, b);
    }
}

impl<T> Deref for Square<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> IsSquare for Square<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn width(&self) -> usize {
        self.width
    }
}

impl<T> Index<SquareIndex> for Square<T> {
    type Output = T;

    fn index(&self, index: SquareIndex) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T> IndexMut<SquareIndex> for Square<T> {
    fn index_mut(&mut self, index: SquareIndex) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl<T> Index<Coord> for Square<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        assert!(coord.col() < self.width);
        &self.elements[coord.index(self.width)]
    }
}

impl<T> IndexMut<Coord> for Square<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        assert!(coord.col() < self.width);
        &mut self.elements[coord.index(self.width)]
    }
}

impl<T> Display for Square<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = self
            .elements
            .iter()
            .map(|e| e.to_string().len())
            .max()
            .unwrap_or(0);
        for row in self.rows() {
            for (i, element) in row.iter().enumerate() {
                if i != 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>1$}", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T> Debug for Square<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

pub struct UnitSquare {
    width: usize,
}

impl UnitSquare {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl IsSquare for UnitSquare {
    fn width(&self) -> usize {
        self.width
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("the length of elements ({0}) is not square")]
pub struct NonSquareLength(pub usize);

impl<T> TryFrom<Vec<T>> for Square<T> {
    type Error = NonSquareLength;

    fn try_from(elements: Vec<T>) -> Result<Self, Self::Error> {
        let width = (elements.len() as f64).sqrt().round() as usize;
        if elements.len() != width.pow(2) {
            return Err(NonSquareLength(elements.len()));
        }
        Ok(Self { width, elements })
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::square::{Coord, NonSquareLength};
    use crate::collections::Square;
    use std::convert::TryFrom;

    #[test]
    fn try_from_vec() {
        assert!(Square::try_from(vec![1; 9]).is_ok())
    }

    #[test]
    fn try_from_non_square_vec() {
        assert_eq!(Err(NonSquareLength(8)), Square::try_from(vec![1; 8]))
    }

    #[test]
    fn from_rows_rejects_ragged() {
        assert!(Square::from_rows(vec![vec![1, 2], vec![3]]).is_err());
        let square = Square::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(3, square[Coord::new(1, 0)]);
    }

    #[test]
    fn transpose() {
        let square = Square::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let expected = Square::from_rows(vec![vec![1, 3], vec![2, 4]]).unwrap();
        assert_eq!(expected, square.transpose());
    }

    #[test]
    fn display() {
        let square = Square::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap();
        assert_eq!("1 2\n2 1\n", square.to_string());
    }

    mod is_square {
        use crate::collections::square::{Coord, IsSquare, UnitSquare, VectorId};

        #[test]
        fn coord_at() {
            assert_eq!(Coord::new(2, 1), UnitSquare::new(3).coord_at(7));
        }

        #[test]
        fn vector_indices() {
            assert_eq!(
                vec![0, 3, 6],
                UnitSquare::new(3)
                    .vector_indices(VectorId::col(0))
                    .collect::<Vec<usize>>()
            );
            assert_eq!(
                vec![6, 7, 8],
                UnitSquare::new(3)
                    .vector_indices(VectorId::row(2))
                    .collect::<Vec<usize>>()
            );
            assert_eq!(
                vec![3, 7, 11, 15],
                UnitSquare::new(4)
                    .vector_indices(VectorId::col(3))
                    .collect::<Vec<usize>>()
            );
        }
    }
}
