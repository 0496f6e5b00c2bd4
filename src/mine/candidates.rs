use std::convert::TryFrom;
use std::ops::Range;

use ahash::AHashSet;
use itertools::{Combinations, Itertools};

use crate::collections::square::SquareIndex;
use crate::mine::Mode;
use crate::rng::SeededRng;

/// Sorted sets of positions to test, pulled in batches
pub(crate) enum Candidates {
    Exhaustive(Combinations<Range<SquareIndex>>),
    Random(RandomCandidates),
}

impl Candidates {
    pub fn new(size: usize, placed: usize, mode: &Mode) -> Self {
        let cells = size.pow(2);
        match *mode {
            Mode::Exhaustive => Candidates::Exhaustive((0..cells).combinations(placed)),
            Mode::Random { tries, seed } => Candidates::Random(RandomCandidates {
                rng: SeededRng::with_seed(seed),
                cells: (0..cells).collect(),
                placed,
                remaining: tries,
                tried: AHashSet::default(),
            }),
        }
    }

    /// Returns up to `max` new candidates, or none when the source is exhausted
    pub fn next_batch(&mut self, max: usize) -> Vec<Vec<SquareIndex>> {
        match self {
            Candidates::Exhaustive(combinations) => combinations.take(max).collect(),
            Candidates::Random(random) => random.next_batch(max),
        }
    }
}

/// Distinct random position sets, at most `remaining` more of them
pub(crate) struct RandomCandidates {
    rng: SeededRng,
    cells: Vec<SquareIndex>,
    placed: usize,
    remaining: u64,
    tried: AHashSet<Vec<SquareIndex>>,
}

impl RandomCandidates {
    /// Makes `max` draws, keeping the ones not seen before.
    /// An empty batch means every draw repeated an earlier one.
    fn next_batch(&mut self, max: usize) -> Vec<Vec<SquareIndex>> {
        let draws = max.min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let mut batch = Vec::with_capacity(draws);
        for _ in 0..draws {
            let mut positions = self.rng.sample(&self.cells, self.placed);
            positions.sort_unstable();
            if self.tried.insert(positions.clone()) {
                batch.push(positions);
            }
        }
        self.remaining -= batch.len() as u64;
        if batch.is_empty() && draws > 0 {
            debug!("No new random candidates in {} draws", draws);
            self.remaining = 0;
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut candidates: Candidates, batch: usize) -> Vec<Vec<SquareIndex>> {
        let mut all = Vec::new();
        loop {
            let next = candidates.next_batch(batch);
            if next.is_empty() {
                return all;
            }
            all.extend(next);
        }
    }

    #[test]
    fn exhaustive_is_lexicographic() {
        let all = drain(Candidates::new(4, 2, &Mode::Exhaustive), 7);
        assert_eq!(120, all.len());
        assert_eq!(vec![0, 1], all[0]);
        assert_eq!(vec![0, 2], all[1]);
        assert_eq!(vec![14, 15], all[119]);
    }

    #[test]
    fn random_is_distinct_and_sorted() {
        let mode = Mode::Random {
            tries: 50,
            seed: Some(7),
        };
        let all = drain(Candidates::new(5, 4, &mode), 16);
        assert_eq!(50, all.len());
        assert!(all.iter().all(|p| p.len() == 4 && p.windows(2).all(|w| w[0] < w[1])));
        assert_eq!(50, all.iter().unique().count());
        assert_eq!(all, drain(Candidates::new(5, 4, &mode), 16));
    }

    #[test]
    fn random_stops_when_space_is_exhausted() {
        // there are only 16 single cells
        let mode = Mode::Random {
            tries: 1000,
            seed: Some(1),
        };
        let all = drain(Candidates::new(4, 1, &mode), 100);
        assert!(all.len() <= 16);
        assert!(!all.is_empty());
    }
}
