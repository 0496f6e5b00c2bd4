//! Play a game of guesses against a hidden solution.
//!
//! Every guess is compared with the solution and the feedback is added to
//! what is known. The next guess is the first Latin square consistent with
//! everything learned so far.

use crate::error::{Error, InvalidInput, Result};
use crate::generate::mixed_latin_square;
use crate::grid::{check_grid_size, Grid};
use crate::rng::SeededRng;
use crate::solve::{complete, Constraints};
use crate::validate::{is_valid, Feedback};

pub const DEFAULT_MAX_GUESSES: usize = 5;

/// A finished game
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub solution: Grid,
    /// Every guess made, starting with the first guess
    pub guesses: Vec<Grid>,
    /// The number of cells known to be correct after each guess
    pub known: Vec<usize>,
}

impl Game {
    pub fn is_solved(&self) -> bool {
        self.guesses.last() == Some(&self.solution)
    }
}

/// Plays against a random solution drawn from `rng`
pub fn play(first_guess: &Grid, rng: &mut SeededRng, max_guesses: usize) -> Result<Game> {
    check_grid_size(first_guess.width())?;
    let solution = mixed_latin_square(first_guess.width(), rng, None)?;
    play_against(first_guess, solution, max_guesses)
}

/// Plays against `solution`, stopping when it is guessed or after `max_guesses`
pub fn play_against(first_guess: &Grid, solution: Grid, max_guesses: usize) -> Result<Game> {
    let size = check_grid_size(first_guess.width())?;
    for grid in &[first_guess, &solution] {
        if grid.width() != size || !is_valid(grid) {
            return Err(InvalidInput::NotLatin(size).into());
        }
    }
    let mut constraints = Constraints::new(size)?;
    let mut guesses = Vec::new();
    let mut known = Vec::new();
    let mut guess = first_guess.clone();
    for round in 1..=max_guesses {
        let feedback = Feedback::compare(&guess, &solution);
        constraints.apply_feedback(&guess, &feedback);
        known.push(constraints.fixed_count());
        debug!("Guess {}: {} cells known", round, constraints.fixed_count());
        guesses.push(guess);
        if feedback.is_solved() || round == max_guesses {
            break;
        }
        guess = complete(&constraints).ok_or(Error::ConstructionFailure { size })?;
    }
    Ok(Game {
        solution,
        guesses,
        known,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::square::Coord;
    use crate::generate::cyclic_latin_square;
    use crate::grid::grid_from_rows;

    fn flipped_cyclic() -> Grid {
        grid_from_rows(vec![
            vec![3, 2, 1, 4],
            vec![2, 3, 4, 1],
            vec![1, 4, 3, 2],
            vec![4, 1, 2, 3],
        ])
        .unwrap()
    }

    #[test]
    fn first_guess_wins() {
        let guess = cyclic_latin_square(4);
        let game = play_against(&guess, guess.clone(), DEFAULT_MAX_GUESSES).unwrap();
        assert!(game.is_solved());
        assert_eq!(vec![guess], game.guesses);
        assert_eq!(vec![16], game.known);
    }

    #[test]
    fn one_intercalate_away() {
        let game = play_against(&cyclic_latin_square(4), flipped_cyclic(), DEFAULT_MAX_GUESSES)
            .unwrap();
        assert!(game.is_solved());
        assert_eq!(2, game.guesses.len());
        assert_eq!(vec![12, 16], game.known);
    }

    #[test]
    fn out_of_guesses() {
        let game = play_against(&cyclic_latin_square(4), flipped_cyclic(), 1).unwrap();
        assert!(!game.is_solved());
        assert_eq!(vec![12], game.known);
    }

    #[test]
    fn guesses_use_every_feedback() {
        let mut rng = SeededRng::new(11);
        for _ in 0..20 {
            let game = play(&cyclic_latin_square(5), &mut rng, DEFAULT_MAX_GUESSES).unwrap();
            assert!(game.guesses.len() <= DEFAULT_MAX_GUESSES);
            assert!(game.known.windows(2).all(|w| w[0] <= w[1]), "{:?}", game.known);
            for (i, guess) in game.guesses.iter().enumerate().skip(1) {
                assert!(is_valid(guess));
                // a later guess agrees with every earlier correct cell
                for earlier in &game.guesses[..i] {
                    let feedback = Feedback::compare(earlier, &game.solution);
                    for &cell in feedback.correct() {
                        assert_eq!(earlier[cell], guess[cell]);
                    }
                    for &cell in feedback.wrong() {
                        assert_ne!(earlier[cell], guess[cell]);
                    }
                }
            }
            if game.is_solved() {
                assert_eq!(Some(&25), game.known.last());
            }
        }
    }

    #[test]
    fn same_seed_same_game() {
        let first = cyclic_latin_square(6);
        let a = play(&first, &mut SeededRng::new(3), DEFAULT_MAX_GUESSES).unwrap();
        let b = play(&first, &mut SeededRng::new(3), DEFAULT_MAX_GUESSES).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_first_guess() {
        let mut guess = cyclic_latin_square(4);
        guess.swap(Coord::new(0, 0), Coord::new(0, 1));
        assert!(matches!(
            play(&guess, &mut SeededRng::new(1), DEFAULT_MAX_GUESSES),
            Err(Error::InvalidInput(InvalidInput::NotLatin(4)))
        ));
        assert!(matches!(
            play(&cyclic_latin_square(3), &mut SeededRng::new(1), DEFAULT_MAX_GUESSES),
            Err(Error::InvalidInput(InvalidInput::GridSize(3)))
        ));
    }
}
