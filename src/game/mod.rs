//! Game logic: puzzles, the wheel, round state, scoring, and the opponent

pub mod catalog;
pub mod difficulty;
pub mod engine;
pub mod letters;
pub mod opponent;
pub mod pacing;
pub mod random;
pub mod round;
pub mod schedule;
pub mod sudden_death;
pub mod wheel;

pub use difficulty::Difficulty;
pub use engine::{GameEngine, GameEvent, GameResult, GameSettings, GameStatus, RoundStart};
pub use pacing::{Pacing, PacingProfile};
pub use round::{RoundOutcome, RoundState};

use std::fmt;
use std::ops::{Index, IndexMut};

/// The five letters that must be bought rather than guessed.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Price of one vowel, charged against the buyer's round score.
pub const VOWEL_COST: u32 = 250;

/// Returns true for an uppercase vowel.
pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter)
}

/// Returns true for an uppercase letter that is not a vowel (`Y` included).
pub fn is_consonant(letter: char) -> bool {
    letter.is_ascii_uppercase() && !is_vowel(letter)
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The human at the keyboard
    Player,
    /// The scripted opponent
    Opponent,
}

impl Side {
    /// The other seat.
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Display label for this seat.
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Opponent => "Computer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-state within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Must spin (or buy a vowel, or solve)
    Spin,
    /// Wheel landed on a value; must call a consonant
    Guess,
    /// Vowel purchased; must pick a vowel
    BuyVowel,
}

/// A dollar amount per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub player: u32,
    pub opponent: u32,
}

impl Index<Side> for Scores {
    type Output = u32;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

impl IndexMut<Side> for Scores {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_classes() {
        for v in VOWELS {
            assert!(is_vowel(v));
            assert!(!is_consonant(v));
        }
        assert!(is_consonant('Y'));
        assert!(is_consonant('B'));
        assert!(!is_consonant('b'));
        assert!(!is_consonant(' '));
        assert!(!is_vowel('a'));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Player.other(), Side::Opponent);
        assert_eq!(Side::Opponent.other(), Side::Player);
        assert_eq!(format!("{}", Side::Opponent), "Computer");
    }

    #[test]
    fn test_scores_indexing() {
        let mut scores = Scores::default();
        scores[Side::Player] += 500;
        scores[Side::Opponent] = 250;

        assert_eq!(scores.player, 500);
        assert_eq!(scores.opponent, 250);
        assert_eq!(scores[Side::Player], 500);
    }
}
