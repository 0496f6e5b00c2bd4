//! Compact puzzle identifiers.
//!
//! An identifier is the grid size as one decimal digit followed by each
//! position in base 62 (`0-9A-Za-z`), most significant digit first. Every
//! position takes the same number of digits, enough for the last cell of
//! the grid.

use ahash::AHashSet;

use crate::error::ParsePuzzleError;
use crate::puzzle::Puzzle;

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const RADIX: usize = DIGITS.len();

/// The number of base 62 digits used for each position of a grid of `size`
pub fn position_width(size: usize) -> usize {
    let mut max = (size.pow(2)).saturating_sub(1) / RADIX;
    let mut width = 1;
    while max > 0 {
        max /= RADIX;
        width += 1;
    }
    width
}

pub fn encode_puzzle(puzzle: &Puzzle) -> String {
    let width = position_width(puzzle.size());
    let mut id = String::with_capacity(1 + width * puzzle.positions().len());
    id.push_str(&puzzle.size().to_string());
    for &position in puzzle.positions() {
        let start = id.len();
        let mut rest = position;
        for _ in 0..width {
            id.insert(start, char::from(DIGITS[rest % RADIX]));
            rest /= RADIX;
        }
        debug_assert_eq!(0, rest);
    }
    id
}

pub fn decode_puzzle(s: &str) -> Result<Puzzle, ParsePuzzleError> {
    let mut chars = s.chars();
    let size_char = chars.next().ok_or(ParsePuzzleError::Empty)?;
    let size = size_char
        .to_digit(10)
        .ok_or(ParsePuzzleError::InvalidSize(size_char))? as usize;
    let width = position_width(size);
    let digits = chars
        .enumerate()
        .map(|(i, c)| {
            digit_value(c).ok_or(ParsePuzzleError::InvalidDigit {
                digit: c,
                index: i + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if digits.len() % width != 0 {
        return Err(ParsePuzzleError::InvalidLength {
            len: digits.len(),
            width,
        });
    }
    let positions = digits
        .chunks(width)
        .map(|chunk| chunk.iter().fold(0, |n, &d| n * RADIX + d))
        .collect::<Vec<_>>();
    let mut seen: AHashSet<usize> = AHashSet::default();
    if let Some(&duplicate) = positions.iter().find(|&&p| !seen.insert(p)) {
        return Err(ParsePuzzleError::DuplicatePosition(duplicate));
    }
    Ok(Puzzle::new(size, positions)?)
}

fn digit_value(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'A'..='Z' => Some(c as usize - 'A' as usize + 10),
        'a'..='z' => Some(c as usize - 'a' as usize + 36),
        _ => None,
    }
}
