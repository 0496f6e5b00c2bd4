use crate::collections::square::{Coord, IsSquare, SquareIndex, UnitSquare, VectorId};
use crate::collections::Square;
use crate::grid::{Grid, Value};
use crate::solve::{Constraints, ValueSet};

/// How many completions a search found, up to its limit
pub enum SearchResult {
    NoSolutions,
    SingleSolution(Grid),
    MultipleSolutions,
}

/// Completions found by a search and the work it took
pub struct SearchOutcome {
    solutions: Vec<Grid>,
    branches: u64,
}

impl SearchOutcome {
    /// Completions found, in search order
    pub fn solutions(&self) -> &[Grid] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Grid> {
        self.solutions
    }

    /// The number of cells where the search had to guess between candidates
    pub fn branches(&self) -> u64 {
        self.branches
    }

    pub fn result(self) -> SearchResult {
        let mut solutions = self.solutions;
        match solutions.len() {
            0 => SearchResult::NoSolutions,
            1 => SearchResult::SingleSolution(solutions.remove(0)),
            _ => SearchResult::MultipleSolutions,
        }
    }
}

/// Searches for Latin squares consistent with `constraints`.
///
/// The search stops as soon as `limit` completions are found, so a limit of
/// two is enough to decide uniqueness.
pub fn search(constraints: &Constraints, limit: usize) -> SearchOutcome {
    let mut context = SearchContext {
        limit,
        solutions: Vec::new(),
        branches: 0,
    };
    if limit > 0 {
        if let Some(markup) = Markup::new(constraints) {
            context.search_next(markup, 0);
        }
    }
    debug!(
        "Search found {} solution(s) with {} branches",
        context.solutions.len(),
        context.branches
    );
    SearchOutcome {
        solutions: context.solutions,
        branches: context.branches,
    }
}

/// Returns any Latin square consistent with `constraints`
pub fn complete(constraints: &Constraints) -> Option<Grid> {
    search(constraints, 1).into_solutions().pop()
}

struct SearchContext {
    limit: usize,
    solutions: Vec<Grid>,
    branches: u64,
}

impl SearchContext {
    fn is_done(&self) -> bool {
        self.solutions.len() >= self.limit
    }

    fn search_next(&mut self, mut markup: Markup, depth: u32) {
        if !markup.propagate() {
            return;
        }
        let (index, domain) = match markup.most_constrained_cell() {
            None => {
                self.solutions.push(markup.into_solution());
                return;
            }
            Some(cell) => cell,
        };
        self.branches += 1;
        for value in domain {
            trace!(
                "Guessing {} at {:?} (depth={})",
                value,
                markup.coord_at(index),
                depth + 1
            );
            let mut guess = markup.clone();
            if guess.solve_cell(index, value) {
                self.search_next(guess, depth + 1);
            }
            if self.is_done() {
                return;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum CellVariable {
    Solved(Value),
    Unsolved(ValueSet),
}

/// The solving state: the candidates of every cell and the values placed in every vector
#[derive(Clone)]
struct Markup {
    cells: Square<CellVariable>,
    vector_values: Vec<ValueSet>,
    unsolved_count: usize,
}

impl Markup {
    fn new(constraints: &Constraints) -> Option<Self> {
        let size = constraints.size();
        let all = ValueSet::with_all(size);
        let cells = Square::from_fn(size, |coord| {
            let index = coord.index(size);
            CellVariable::Unsolved(all.difference(constraints.excluded(index)))
        });
        let mut markup = Self {
            cells,
            vector_values: vec![ValueSet::new(); size * 2],
            unsolved_count: size.pow(2),
        };
        for index in 0..markup.cells.len() {
            if let Some(value) = constraints.fixed(index) {
                if !markup.solve_cell(index, value) {
                    return None;
                }
            }
        }
        Some(markup)
    }

    fn width(&self) -> usize {
        self.cells.width()
    }

    fn coord_at(&self, index: SquareIndex) -> Coord {
        self.cells.coord_at(index)
    }

    /// Places `value` and removes it from the candidates of the cell's row and column.
    /// Returns false on a contradiction.
    fn solve_cell(&mut self, index: SquareIndex, value: Value) -> bool {
        match self.cells[index] {
            CellVariable::Unsolved(domain) if domain.contains(value) => {}
            _ => return false,
        }
        self.cells[index] = CellVariable::Solved(value);
        self.unsolved_count -= 1;
        let coord = self.cells.coord_at(index);
        let width = self.width();
        for vector_id in coord.vectors().iter().copied() {
            if !self.vector_values[usize::from(vector_id)].insert(value) {
                return false;
            }
            for peer in UnitSquare::new(width).vector_indices(vector_id) {
                if let CellVariable::Unsolved(ref mut domain) = self.cells[peer] {
                    domain.remove(value);
                    if domain.is_empty() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Solves naked singles and hidden singles until nothing changes.
    /// Returns false on a contradiction.
    fn propagate(&mut self) -> bool {
        loop {
            let mut progress = false;
            for index in 0..self.cells.len() {
                if let CellVariable::Unsolved(domain) = self.cells[index] {
                    match domain.single_value() {
                        Some(value) => {
                            if !self.solve_cell(index, value) {
                                return false;
                            }
                            progress = true;
                        }
                        None if domain.is_empty() => return false,
                        None => {}
                    }
                }
            }
            for vector_id in VectorId::all(self.width()) {
                match self.hidden_singles(vector_id) {
                    None => return false,
                    Some(solved) => progress |= solved,
                }
            }
            if !progress {
                return true;
            }
        }
    }

    /// Solves every value that has exactly one possible cell in a vector.
    /// Returns `None` on a contradiction, or whether any cell was solved.
    fn hidden_singles(&mut self, vector_id: VectorId) -> Option<bool> {
        let width = self.width();
        let mut solved = false;
        let missing = ValueSet::with_all(width).difference(self.vector_values[usize::from(vector_id)]);
        for value in missing {
            // the value may have been placed by an earlier single in this loop
            if self.vector_values[usize::from(vector_id)].contains(value) {
                continue;
            }
            let (first, second) = {
                let mut positions = UnitSquare::new(width)
                    .vector_indices(vector_id)
                    .filter(|&i| match self.cells[i] {
                        CellVariable::Unsolved(domain) => domain.contains(value),
                        CellVariable::Solved(_) => false,
                    });
                (positions.next(), positions.next())
            };
            let index = first?;
            if second.is_none() {
                if !self.solve_cell(index, value) {
                    return None;
                }
                solved = true;
            }
        }
        Some(solved)
    }

    /// Finds an unsolved cell with the fewest candidates
    fn most_constrained_cell(&self) -> Option<(SquareIndex, ValueSet)> {
        if self.unsolved_count == 0 {
            return None;
        }
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| match *cell {
                CellVariable::Unsolved(domain) => Some((i, domain)),
                CellVariable::Solved(_) => None,
            })
            .min_by_key(|(_, domain)| domain.len())
    }

    fn into_solution(self) -> Grid {
        let width = self.width();
        let values = self
            .cells
            .iter()
            .map(|cell| match *cell {
                CellVariable::Solved(value) => value,
                CellVariable::Unsolved(_) => unreachable!("unsolved cell in solution"),
            })
            .collect::<Vec<_>>();
        Square::from_fn(width, |coord| values[coord.index(width)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::cyclic_latin_square;
    use crate::validate::is_valid;

    fn count(constraints: &Constraints, limit: usize) -> usize {
        search(constraints, limit).solutions().len()
    }

    #[test]
    fn unconstrained_order_four() {
        // there are 576 Latin squares of order 4
        let constraints = Constraints::new(4).unwrap();
        let outcome = search(&constraints, usize::MAX);
        assert_eq!(576, outcome.solutions().len());
        assert!(outcome.solutions().iter().all(is_valid));
    }

    #[test]
    fn stops_at_limit() {
        let constraints = Constraints::new(5).unwrap();
        assert_eq!(2, count(&constraints, 2));
        assert_eq!(0, count(&constraints, 0));
    }

    #[test]
    fn fully_fixed() {
        let reference = cyclic_latin_square(5);
        let all: Vec<_> = (0..25).collect();
        let constraints = Constraints::from_clues(&reference, &all).unwrap();
        let outcome = search(&constraints, 2);
        assert_eq!(0, outcome.branches());
        match outcome.result() {
            SearchResult::SingleSolution(grid) => assert_eq!(reference, grid),
            _ => panic!("expected a single solution"),
        }
    }

    #[test]
    fn contradictory_clues() {
        let mut constraints = Constraints::new(4).unwrap();
        constraints.fix(0, 1);
        constraints.fix(1, 1);
        assert!(matches!(search(&constraints, 2).result(), SearchResult::NoSolutions));
    }

    #[test]
    fn feedback_excludes_reference() {
        let reference = cyclic_latin_square(4);
        let constraints = Constraints::from_clues(&reference, &[0, 5]).unwrap();
        let solution = complete(&constraints).unwrap();
        assert!(is_valid(&solution));
        for i in 0..16_usize {
            if i == 0 || i == 5 {
                assert_eq!(reference[i], solution[i]);
            } else {
                assert_ne!(reference[i], solution[i]);
            }
        }
    }
}
