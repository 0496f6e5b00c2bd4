//! Generate, validate and mine Latin squares for Sudodle puzzles

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod error;
pub mod generate;
pub mod grid;
pub mod mine;
pub mod puzzle;
pub mod rng;
pub mod simulate;
pub mod solve;
pub mod validate;

pub use crate::error::{Error, Result};
pub use crate::generate::{
    cyclic_latin_square, mixed_latin_square, random_latin_square, uniform_random_latin_square,
};
pub use crate::grid::{Grid, Value};
pub use crate::mine::{mine_puzzles, Budget, MinerConfig, Mode};
pub use crate::puzzle::{decode_puzzle, encode_puzzle, Difficulty, Puzzle, PuzzleRecord};
pub use crate::rng::SeededRng;
pub use crate::solve::{has_unique_solution, Uniqueness};
pub use crate::validate::{check_latin_square, find_latin_square_violations};
