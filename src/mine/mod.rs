//! Mine sets of correct cells that determine a unique Latin square

use std::convert::TryFrom;
use std::time::{Duration, Instant};

use ahash::AHashSet;
use rayon::prelude::*;

pub use self::symmetry::{Symmetry, SymmetryGroup};

use self::candidates::Candidates;
use crate::collections::square::SquareIndex;
use crate::error::{InvalidInput, Result};
use crate::generate::cyclic_latin_square;
use crate::grid::{check_grid_size, Grid};
use crate::puzzle::{Difficulty, Puzzle, PuzzleRecord};
use crate::solve::has_unique_solution;
use crate::validate::is_valid;

mod candidates;
mod symmetry;

pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// How candidate position sets are chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Every set of positions, in lexicographic order
    Exhaustive,
    /// Up to `tries` distinct random sets of positions
    Random { tries: u64, seed: Option<u64> },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Exhaustive
    }
}

/// Limits on a mining run, checked between batches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_candidates: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    pub fn time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MinerConfig {
    size: usize,
    placed: usize,
    mode: Mode,
    budget: Budget,
    symmetry: Symmetry,
    threads: Option<usize>,
    batch_size: usize,
    reference: Option<Grid>,
}

impl MinerConfig {
    pub fn new(size: usize, placed: usize) -> Self {
        Self {
            size,
            placed,
            mode: Mode::default(),
            budget: Budget::default(),
            symmetry: Symmetry::default(),
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
            reference: None,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn symmetry(mut self, symmetry: Symmetry) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Worker threads for the solver. Unset lets rayon decide.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The grid whose cells are marked correct. Defaults to the cyclic square.
    pub fn reference(mut self, reference: Grid) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Checks the configuration and resolves the reference grid
    fn checked_reference(&self) -> Result<Grid, InvalidInput> {
        let size = check_grid_size(self.size)?;
        let cells = size.pow(2);
        if self.placed >= cells {
            return Err(InvalidInput::PlacedCount {
                placed: self.placed,
                cells,
            });
        }
        match &self.reference {
            None => Ok(cyclic_latin_square(size)),
            Some(grid) if grid.width() == size && is_valid(grid) => Ok(grid.clone()),
            Some(_) => Err(InvalidInput::NotLatin(size)),
        }
    }
}

/// Counters for a mining run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MineStats {
    /// Position sets tested
    pub candidates: u64,
    /// Tested sets with a unique completion
    pub unique: u64,
    /// Unique sets equivalent to a puzzle already found
    pub duplicates: u64,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct Mined {
    /// Distinct puzzles in the order they were found
    pub records: Vec<PuzzleRecord>,
    pub stats: MineStats,
}

/// Mines puzzles with default settings, deduplicated by transpose over the cyclic square
pub fn mine_puzzles(size: usize, placed: usize, mode: Mode, budget: Budget) -> Result<Vec<PuzzleRecord>> {
    let config = MinerConfig::new(size, placed).mode(mode).budget(budget);
    Ok(mine(&config)?.records)
}

pub fn mine(config: &MinerConfig) -> Result<Mined> {
    let reference = config.checked_reference()?;
    let size = config.size;
    let group = SymmetryGroup::new(config.symmetry, &reference);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;
    info!(
        "Mining {}x{} puzzles with {} correct cells using {} threads",
        size,
        size,
        config.placed,
        pool.current_num_threads()
    );

    let start = Instant::now();
    let mut candidates = Candidates::new(size, config.placed, &config.mode);
    let mut stats = MineStats::default();
    let mut seen: AHashSet<Vec<SquareIndex>> = AHashSet::default();
    let mut records = Vec::new();
    loop {
        if let Some(time_limit) = config.budget.time_limit {
            if start.elapsed() >= time_limit {
                info!("Time limit reached");
                break;
            }
        }
        let mut batch_size = config.batch_size;
        if let Some(max) = config.budget.max_candidates {
            let left = max.saturating_sub(stats.candidates);
            if left == 0 {
                info!("Candidate limit reached");
                break;
            }
            batch_size = batch_size.min(usize::try_from(left).unwrap_or(usize::MAX));
        }
        let batch = candidates.next_batch(batch_size);
        if batch.is_empty() {
            break;
        }

        let branches = pool.install(|| {
            batch
                .par_iter()
                .map(|positions| -> Result<Option<u64>> {
                    let uniqueness = has_unique_solution(size, positions, &reference)?;
                    Ok(if uniqueness.unique {
                        Some(uniqueness.branches)
                    } else {
                        None
                    })
                })
                .collect::<Result<Vec<_>>>()
        })?;

        stats.candidates += batch.len() as u64;
        for (positions, branches) in batch.iter().zip(branches) {
            let branches = match branches {
                Some(branches) => branches,
                None => continue,
            };
            stats.unique += 1;
            let canonical = group.canonical(positions);
            if !seen.insert(canonical.clone()) {
                stats.duplicates += 1;
                continue;
            }
            let branches = if canonical == *positions {
                branches
            } else {
                canonical_branches(size, &canonical, &reference)?
            };
            trace!("Found {:?} with {} branches", canonical, branches);
            records.push(PuzzleRecord::new(
                Puzzle::new(size, canonical)?,
                Difficulty::from_branches(branches),
            ));
        }
        info!(
            "{} candidates tested, {} unique, {} puzzles",
            stats.candidates,
            stats.unique,
            records.len()
        );
    }
    stats.elapsed = start.elapsed();
    info!(
        "Found {} puzzles ({} duplicates) in {:.2?}",
        records.len(),
        stats.duplicates,
        stats.elapsed
    );
    Ok(Mined { records, stats })
}

/// Grades the canonical representative itself, since the solver's guesses depend on cell order
fn canonical_branches(size: usize, positions: &[SquareIndex], reference: &Grid) -> Result<u64> {
    let uniqueness = has_unique_solution(size, positions, reference)?;
    assert!(uniqueness.unique, "symmetric image of a unique puzzle is not unique");
    Ok(uniqueness.branches)
}
