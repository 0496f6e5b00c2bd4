use crate::collections::square::{IsSquare, SquareIndex};
use crate::collections::Square;
use crate::error::InvalidInput;
use crate::grid::{check_grid_size, check_positions, Grid, Value};
use crate::solve::ValueSet;
use crate::validate::{is_valid, Feedback};

/// What is known about the hidden solution: fixed cells and values each cell is known not to hold
#[derive(Clone, Debug, PartialEq)]
pub struct Constraints {
    fixed: Square<Option<Value>>,
    excluded: Square<ValueSet>,
}

impl Constraints {
    /// Creates constraints that know nothing
    pub fn new(size: usize) -> Result<Self, InvalidInput> {
        check_grid_size(size)?;
        Ok(Self {
            fixed: Square::with_width(size),
            excluded: Square::with_width(size),
        })
    }

    /// Constraints induced by marking `positions` of `reference` as correct.
    ///
    /// Cells at `positions` hold the reference value and every other cell
    /// holds anything but its reference value.
    pub fn from_clues(reference: &Grid, positions: &[SquareIndex]) -> Result<Self, InvalidInput> {
        let size = reference.width();
        let mut constraints = Self::new(size)?;
        if !is_valid(reference) {
            return Err(InvalidInput::NotLatin(size));
        }
        check_positions(size, positions)?;
        for i in 0..reference.len() {
            constraints.exclude(i, reference[i]);
        }
        for &i in positions {
            constraints.fix(i, reference[i]);
        }
        Ok(constraints)
    }

    pub fn size(&self) -> usize {
        self.fixed.width()
    }

    /// Declares the value of a cell, clearing its exclusions
    pub fn fix(&mut self, index: SquareIndex, value: Value) {
        self.fixed[index] = Some(value);
        self.excluded[index] = ValueSet::new();
    }

    /// Declares that a cell does not hold `value`
    pub fn exclude(&mut self, index: SquareIndex, value: Value) {
        self.excluded[index].insert(value);
    }

    /// Records the feedback given for a guess
    pub fn apply_feedback(&mut self, guess: &Grid, feedback: &Feedback) {
        assert_eq!(self.size(), guess.width(), "guess is the wrong size");
        for &i in feedback.correct() {
            self.fix(i, guess[i]);
        }
        for &i in feedback.wrong() {
            self.exclude(i, guess[i]);
        }
    }

    pub fn fixed(&self, index: SquareIndex) -> Option<Value> {
        self.fixed[index]
    }

    pub fn excluded(&self, index: SquareIndex) -> ValueSet {
        self.excluded[index]
    }

    /// The number of fixed cells
    pub fn fixed_count(&self) -> usize {
        self.fixed.iter().filter(|v| v.is_some()).count()
    }
}
