//! Difficulty profiles
//!
//! Each difficulty tunes how the opponent picks consonants, how eagerly it
//! buys vowels and tries to solve, and which letters start face-up.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of difficulties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tuning table for one difficulty.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyProfile {
    /// The 21 consonants, most preferred first
    pub letter_frequency_order: [char; 21],
    /// Chance of calling a consonant known to be in the answer
    pub smart_guess_probability: f64,
    /// Chance of buying a vowel when able to
    pub vowel_buy_probability: f64,
    /// Revealed fraction at which the opponent starts trying to solve
    pub solve_attempt_threshold: f64,
    /// Shuffle candidates instead of following the frequency order
    pub blind_guessing: bool,
    /// Letters turned face-up (and marked used) at round start
    pub pre_revealed: &'static [char],
}

static EASY: DifficultyProfile = DifficultyProfile {
    letter_frequency_order: [
        'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
        'X', 'Y', 'Z',
    ],
    smart_guess_probability: 0.0,
    vowel_buy_probability: 0.08,
    solve_attempt_threshold: 0.90,
    blind_guessing: true,
    pre_revealed: &['R', 'S', 'T', 'L', 'N', 'E'],
};

static MEDIUM: DifficultyProfile = DifficultyProfile {
    letter_frequency_order: [
        'R', 'S', 'T', 'L', 'N', 'H', 'M', 'D', 'G', 'B', 'C', 'P', 'F', 'W', 'Y', 'V', 'K', 'X',
        'J', 'Q', 'Z',
    ],
    smart_guess_probability: 0.60,
    vowel_buy_probability: 0.25,
    solve_attempt_threshold: 0.68,
    blind_guessing: false,
    pre_revealed: &['R', 'S', 'T', 'L'],
};

static HARD: DifficultyProfile = DifficultyProfile {
    letter_frequency_order: [
        'N', 'T', 'R', 'S', 'D', 'G', 'B', 'M', 'K', 'L', 'P', 'H', 'C', 'F', 'W', 'Y', 'V', 'J',
        'X', 'Q', 'Z',
    ],
    smart_guess_probability: 0.90,
    vowel_buy_probability: 0.55,
    solve_attempt_threshold: 0.42,
    blind_guessing: false,
    pre_revealed: &[],
};

impl Difficulty {
    /// All difficulties in menu order.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// The tuning table for this difficulty.
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }

    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
