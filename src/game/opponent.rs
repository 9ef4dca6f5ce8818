//! Scripted opponent
//!
//! Decisions depend only on the visible round state, the difficulty profile
//! and random draws:
//! - solve once enough of the board is showing (and a coin flip agrees)
//! - otherwise maybe buy a vowel it can afford
//! - otherwise spin, then call a consonant by frequency order, sometimes
//!   peeking at the answer depending on difficulty

use super::difficulty::DifficultyProfile;
use super::random::RandomSource;
use super::round::RoundState;
use super::sudden_death;
use super::{is_consonant, Side, VOWEL_COST};
use log::debug;

/// Chance of going for the solve once the threshold is met.
pub const SOLVE_CHANCE: f64 = 0.65;

/// Revealed fraction that must be exceeded before buying vowels.
pub const VOWEL_BUY_MIN_REVEALED: f64 = 0.15;

/// What the opponent does at the start of its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentMove {
    Solve,
    BuyVowel(char),
    Spin,
}

/// The opponent's decision policy for one difficulty.
#[derive(Debug, Clone, Copy)]
pub struct Opponent {
    profile: &'static DifficultyProfile,
}

impl Opponent {
    pub fn new(profile: &'static DifficultyProfile) -> Self {
        Self { profile }
    }

    /// Choose the opening move of a turn (called at phase `Spin`).
    pub fn decide_turn<R: RandomSource>(&self, state: &RoundState, rng: &mut R) -> OpponentMove {
        let fraction = state.revealed_fraction();

        if fraction >= self.profile.solve_attempt_threshold && rng.chance(SOLVE_CHANCE) {
            debug!("opponent solves at {:.2} revealed", fraction);
            return OpponentMove::Solve;
        }

        if state.round_score[Side::Opponent] >= VOWEL_COST
            && state.has_unused_vowel_in_answer()
            && fraction > VOWEL_BUY_MIN_REVEALED
            && rng.chance(self.profile.vowel_buy_probability)
        {
            let vowels = state.unused_vowels_in_answer();
            let vowel = vowels[rng.index(vowels.len())];
            debug!("opponent buys {}", vowel);
            return OpponentMove::BuyVowel(vowel);
        }

        OpponentMove::Spin
    }

    /// Choose a consonant after a cash spin, or `None` if none are left.
    pub fn pick_consonant<R: RandomSource>(&self, state: &RoundState, rng: &mut R) -> Option<char> {
        let mut candidates: Vec<char> = self
            .profile
            .letter_frequency_order
            .iter()
            .copied()
            .filter(|c| is_consonant(*c) && !state.is_used(*c))
            .collect();

        if self.profile.blind_guessing {
            rng.shuffle(&mut candidates);
            return candidates.first().copied();
        }

        let known = candidates.iter().copied().find(|c| state.in_answer(*c));
        if let Some(letter) = known {
            if rng.chance(self.profile.smart_guess_probability) {
                return Some(letter);
            }
        }
        candidates.first().copied()
    }

    /// The one solve check the opponent gets in sudden death.
    pub fn sudden_death_solve<R: RandomSource>(&self, state: &RoundState, rng: &mut R) -> bool {
        sudden_death::opponent_may_solve(state) && rng.chance(sudden_death::OPPONENT_SOLVE_CHANCE)
    }
}
