//! Flat puzzle files: a header line followed by one `id,difficulty` line per puzzle

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{ParseDifficultyError, PuzzleFileError};
use crate::puzzle::{decode_puzzle, Difficulty, PuzzleRecord};

pub const HEADER: &str = "compacted_puzzle,difficulty";

/// Puzzle records grouped by grid size, then difficulty
pub type GroupedRecords = BTreeMap<usize, BTreeMap<Difficulty, Vec<PuzzleRecord>>>;

/// Writes the header and every record
pub fn write_records<W: Write>(mut writer: W, records: &[PuzzleRecord]) -> Result<(), PuzzleFileError> {
    writeln!(writer, "{}", HEADER)?;
    write_lines(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

fn write_lines<W: Write>(writer: &mut W, records: &[PuzzleRecord]) -> Result<(), PuzzleFileError> {
    for record in records {
        writeln!(writer, "{},{}", record.puzzle, record.difficulty)?;
    }
    Ok(())
}

/// Reads records. The header line is optional and blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<PuzzleRecord>, PuzzleFileError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || (i == 0 && line == HEADER) {
            continue;
        }
        records.push(parse_line(line, i + 1)?);
    }
    Ok(records)
}

fn parse_line(line: &str, line_number: usize) -> Result<PuzzleRecord, PuzzleFileError> {
    let mut fields = line.splitn(2, ',');
    let (id, difficulty) = match (fields.next(), fields.next()) {
        (Some(id), Some(difficulty)) => (id.trim(), difficulty.trim()),
        _ => return Err(PuzzleFileError::Format { line: line_number }),
    };
    let puzzle = decode_puzzle(id).map_err(|source| PuzzleFileError::Parse {
        line: line_number,
        source,
    })?;
    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|ParseDifficultyError(value)| PuzzleFileError::Difficulty {
            line: line_number,
            value,
        })?;
    Ok(PuzzleRecord { puzzle, difficulty })
}

/// Creates or truncates a puzzle file
pub fn save_records<P: AsRef<Path>>(path: P, records: &[PuzzleRecord]) -> Result<(), PuzzleFileError> {
    write_records(BufWriter::new(File::create(path)?), records)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<PuzzleRecord>, PuzzleFileError> {
    read_records(BufReader::new(File::open(path)?))
}

/// Adds records to the end of a puzzle file, writing the header if the file is new or empty
pub fn append_records<P: AsRef<Path>>(path: P, records: &[PuzzleRecord]) -> Result<(), PuzzleFileError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_empty = file.metadata()?.len() == 0;
    let mut writer = BufWriter::new(file);
    if is_empty {
        writeln!(writer, "{}", HEADER)?;
    }
    write_lines(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

pub fn group_records<I>(records: I) -> GroupedRecords
where
    I: IntoIterator<Item = PuzzleRecord>,
{
    let mut groups = GroupedRecords::new();
    for record in records {
        groups
            .entry(record.puzzle.size())
            .or_default()
            .entry(record.difficulty)
            .or_default()
            .push(record);
    }
    groups
}
