//! Puzzle catalog
//!
//! Embeds the built-in puzzle table at build time (`CATEGORY|ANSWER`, one
//! per line) and hands out puzzles without repeats until the table is
//! exhausted.

use super::random::RandomSource;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;

/// Embedded puzzle table
static PUZZLE_DATA: &str = include_str!("../../data/puzzles.txt");

/// Built-in catalog, parsed once on first use
static STANDARD: Lazy<PuzzleCatalog> = Lazy::new(|| {
    let puzzles = PUZZLE_DATA
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (category, answer) = line.split_once('|').expect("puzzle line has a category");
            Puzzle::new(category, answer).expect("built-in puzzle is valid")
        })
        .collect();
    PuzzleCatalog::new(puzzles).expect("built-in catalog is not empty")
});

/// Errors raised while building puzzles or catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("puzzle answer is empty")]
    EmptyAnswer,
    #[error("puzzle answer {answer:?} may only contain letters and single spaces")]
    InvalidAnswer { answer: String },
    #[error("catalog has no puzzles")]
    EmptyCatalog,
}

/// A category and the phrase to be guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub category: String,
    /// Uppercase, words separated by single spaces
    pub answer: String,
}

impl Puzzle {
    /// Build a puzzle, uppercasing the answer.
    pub fn new(category: &str, answer: &str) -> Result<Self, CatalogError> {
        let answer = answer.trim().to_uppercase();
        if answer.is_empty() {
            return Err(CatalogError::EmptyAnswer);
        }

        let well_formed = answer.split(' ').all(|word| {
            !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
        });
        if !well_formed {
            return Err(CatalogError::InvalidAnswer { answer });
        }

        Ok(Self {
            category: category.trim().to_string(),
            answer,
        })
    }

    /// Number of letter tiles (spaces excluded).
    pub fn letter_count(&self) -> usize {
        self.answer.chars().filter(|c| *c != ' ').count()
    }
}

/// A fixed list of puzzles.
#[derive(Debug, Clone)]
pub struct PuzzleCatalog {
    puzzles: Vec<Puzzle>,
}

impl PuzzleCatalog {
    /// Build a catalog from a non-empty list.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, CatalogError> {
        if puzzles.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Self { puzzles })
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    #[cfg(test)]
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// Draw a puzzle whose index is not in `excluded`, then exclude it.
    ///
    /// Once every index has been excluded the set is cleared, so repeats
    /// only happen after the whole catalog has been played.
    pub fn select_puzzle<R: RandomSource>(
        &self,
        excluded: &mut HashSet<usize>,
        rng: &mut R,
    ) -> (Puzzle, usize) {
        if (0..self.puzzles.len()).all(|i| excluded.contains(&i)) {
            excluded.clear();
        }

        let candidates: Vec<usize> = (0..self.puzzles.len())
            .filter(|i| !excluded.contains(i))
            .collect();
        let index = candidates[rng.index(candidates.len())];

        excluded.insert(index);
        (self.puzzles[index].clone(), index)
    }
}
