#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use sudodle::collections::square::Coord;
use sudodle::collections::Square;
use sudodle::grid::{check_grid_size, grid_from_rows, Grid, Value};
use sudodle::mine::{mine, MinerConfig};
use sudodle::puzzle::store::{append_records, save_records};
use sudodle::puzzle::{decode_puzzle, PuzzleRecord};
use sudodle::simulate::play;
use sudodle::{
    cyclic_latin_square, find_latin_square_violations, has_unique_solution,
    uniform_random_latin_square, SeededRng,
};

use crate::options::{Command, Generate, Mine, Options, Simulate};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    match options.command() {
        Command::Cyclic { size } => {
            let size = check_grid_size(*size)?;
            print!("{}", cyclic_latin_square(size));
        }
        Command::Generate(generate) => run_generate(generate)?,
        Command::Check { rows } => run_check(rows)?,
        Command::Simulate(simulate) => run_simulate(simulate)?,
        Command::Mine(mine) => run_mine(mine)?,
        Command::Decode { id } => run_decode(id)?,
    }
    Ok(())
}

fn run_generate(generate: &Generate) -> Result<()> {
    let seed = match generate.seed {
        Some(seed) => seed,
        None => SeededRng::from_entropy().seed(),
    };
    let grid = uniform_random_latin_square(generate.size, seed, generate.steps)?;
    println!("Seed {}", seed);
    print!("{}", grid);
    Ok(())
}

fn run_check(rows: &[String]) -> Result<()> {
    let rows = rows
        .iter()
        .map(|row| parse_row(row))
        .collect::<Result<Vec<_>>>()?;
    let grid = grid_from_rows(rows)?;
    let violations = find_latin_square_violations(&grid);
    if violations.is_empty() {
        println!("Valid Latin square");
    } else {
        println!(
            "Not a Latin square. Violations at {}",
            violations
                .iter()
                .map(|(row, col)| format!("({}, {})", row, col))
                .join(", ")
        );
        print!("{}", mark_cells(&grid, violations.into_iter().map(Coord::from)));
    }
    Ok(())
}

/// Parses `1234` or `1,2,3,4`
fn parse_row(row: &str) -> Result<Vec<Value>> {
    let parse = |s: &str| {
        s.trim()
            .parse::<Value>()
            .with_context(|| format!("invalid value {:?} in row {:?}", s, row))
    };
    if row.contains(',') {
        row.split(',').map(parse).collect()
    } else {
        row.chars()
            .map(|c| parse(c.encode_utf8(&mut [0; 4])))
            .collect()
    }
}

fn run_simulate(simulate: &Simulate) -> Result<()> {
    let size = check_grid_size(simulate.size)?;
    let mut rng = SeededRng::with_seed(simulate.seed);
    println!("Seed {}", rng.seed());
    let game = play(&cyclic_latin_square(size), &mut rng, simulate.guesses)?;
    println!("Solution:\n{}", game.solution);
    for (i, (guess, known)) in game.guesses.iter().zip(&game.known).enumerate() {
        println!("Guess {}: {} cells known\n{}", i + 1, known, guess);
    }
    if game.is_solved() {
        println!("Solved in {} guesses", game.guesses.len());
    } else {
        println!("Not solved after {} guesses", game.guesses.len());
    }
    Ok(())
}

fn run_mine(options: &Mine) -> Result<()> {
    let mut config = MinerConfig::new(options.size, options.placed)
        .mode(options.mode)
        .budget(options.budget)
        .symmetry(options.symmetry);
    if let Some(threads) = options.threads {
        config = config.threads(threads);
    }
    if let Some(batch_size) = options.batch_size {
        config = config.batch_size(batch_size);
    }
    let mined = mine(&config)?;
    match options.output() {
        Some(path) => {
            let written = if options.append() {
                append_records(path, &mined.records)
            } else {
                save_records(path, &mined.records)
            };
            written.with_context(|| format!("failed to write {}", path.display()))?;
            println!("Saved {} puzzles to {}", mined.records.len(), path.display());
        }
        None => print_records(&mined.records),
    }
    println!(
        "{} candidates tested, {} unique, {} duplicates in {:.2?}",
        mined.stats.candidates, mined.stats.unique, mined.stats.duplicates, mined.stats.elapsed
    );
    Ok(())
}

fn print_records(records: &[PuzzleRecord]) {
    for record in records {
        println!("{},{}", record.puzzle, record.difficulty);
    }
}

fn run_decode(id: &str) -> Result<()> {
    let puzzle = decode_puzzle(id).with_context(|| format!("invalid puzzle {:?}", id))?;
    let reference = cyclic_latin_square(puzzle.size());
    println!(
        "Size {}, correct cells {}",
        puzzle.size(),
        puzzle.coords().map(|c| format!("{:?}", c)).join(" ")
    );
    print!("{}", mark_cells(&reference, puzzle.coords()));
    let uniqueness = has_unique_solution(puzzle.size(), puzzle.positions(), &reference)?;
    match uniqueness.solution {
        Some(solution) => {
            println!("Unique solution ({} branches)", uniqueness.branches);
            print!("{}", solution);
        }
        None if uniqueness.solutions_found == 0 => {
            return Err(anyhow!("puzzle {} has no solution", id))
        }
        None => return Err(anyhow!("puzzle {} has more than one solution", id)),
    }
    Ok(())
}

/// Shows `grid` with every cell not in `coords` replaced by a dot
fn mark_cells(grid: &Grid, coords: impl IntoIterator<Item = Coord>) -> Square<String> {
    let mut marked = Square::from_fn(grid.width(), |_| ".".to_string());
    for coord in coords {
        marked[coord] = grid[coord].to_string();
    }
    marked
}
