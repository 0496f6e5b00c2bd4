use std::io;

use thiserror::Error;

use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("no Latin square of size {size} could be constructed")]
    ConstructionFailure { size: usize },
    #[error("failed to start worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Input rejected before any search begins
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error(
        "grid size {0} is not supported (expected {} to {})",
        MIN_GRID_SIZE,
        MAX_GRID_SIZE
    )]
    GridSize(usize),
    #[error("{placed} placed cells is too many for a grid of {cells} cells")]
    PlacedCount { placed: usize, cells: usize },
    #[error("position {position} is outside of a grid of {cells} cells")]
    Position { position: usize, cells: usize },
    #[error("the number of grid values ({0}) is not square")]
    GridShape(usize),
    #[error("the grid is not a Latin square of size {0}")]
    NotLatin(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParsePuzzleError {
    #[error("empty puzzle identifier")]
    Empty,
    #[error("invalid grid size: {0:?}")]
    InvalidSize(char),
    #[error("invalid digit {digit:?} at {index}")]
    InvalidDigit { digit: char, index: usize },
    #[error("identifier length {len} does not fit positions of {width} digits")]
    InvalidLength { len: usize, width: usize },
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("duplicate position {0}")]
    DuplicatePosition(usize),
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown difficulty {0:?} (expected normal, hard or expert)")]
pub struct ParseDifficultyError(pub String);

#[derive(Debug, Error)]
pub enum PuzzleFileError {
    #[error("error reading or writing puzzle file")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParsePuzzleError,
    },
    #[error("line {line}: invalid difficulty {value:?}")]
    Difficulty { line: usize, value: String },
    #[error("line {line}: expected \"id,difficulty\"")]
    Format { line: usize },
}
