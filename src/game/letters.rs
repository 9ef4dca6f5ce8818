//! Letter resolution and scoring

use super::round::RoundState;
use super::{is_consonant, is_vowel, Side, VOWEL_COST};

/// Result of applying one called letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub letter: char,
    /// Tiles newly turned face-up
    pub count: usize,
    pub hit: bool,
    /// Dollars added to the caller's round score
    pub earned: u32,
}

/// Turn every hidden `letter` tile face-up and mark the letter used.
///
/// Returns how many tiles were revealed. No scoring.
pub fn reveal_letter(state: &mut RoundState, letter: char) -> usize {
    let positions: Vec<usize> = state
        .puzzle
        .answer
        .char_indices()
        .filter(|(i, c)| *c == letter && !state.revealed.contains(i))
        .map(|(i, _)| i)
        .collect();

    state.revealed.extend(positions.iter().copied());
    state.used_letters.insert(letter);
    positions.len()
}

/// Apply a letter called by `by` and settle the money.
///
/// A player's vowel costs [`VOWEL_COST`] whether or not it hits. A consonant
/// hit pays `count * spin_value`.
pub fn resolve_letter(state: &mut RoundState, letter: char, by: Side) -> Resolution {
    let count = reveal_letter(state, letter);
    let hit = count > 0;

    if is_vowel(letter) && by == Side::Player {
        state.round_score.player = state.round_score.player.saturating_sub(VOWEL_COST);
    }

    let earned = if is_consonant(letter) && hit {
        count as u32 * state.spin_value
    } else {
        0
    };
    state.round_score[by] += earned;

    Resolution {
        letter,
        count,
        hit,
        earned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::Puzzle;
    use crate::game::{Phase, Scores};
    use proptest::prelude::*;

    fn state(answer: &str, pre: &[char]) -> RoundState {
        let puzzle = Puzzle::new("PHRASE", answer).unwrap();
        RoundState::new(1, 3, puzzle, Scores::default(), pre)
    }

    #[test]
    fn test_consonant_hit_pays_per_tile() {
        let mut s = state("BIRDS OF A FEATHER", &['R', 'S', 'T', 'L']);
        s.phase = Phase::Guess;
        s.spin_value = 500;

        let r = resolve_letter(&mut s, 'B', Side::Player);

        assert_eq!(r.count, 1);
        assert!(r.hit);
        assert_eq!(r.earned, 500);
        assert_eq!(s.round_score.player, 500);
    }

    #[test]
    fn test_double_letter_pays_twice() {
        let mut s = state("PIGGY BANK", &[]);
        s.spin_value = 650;

        let r = resolve_letter(&mut s, 'G', Side::Opponent);

        assert_eq!(r.count, 2);
        assert_eq!(s.round_score.opponent, 1300);
        assert_eq!(s.round_score.player, 0);
    }

    #[test]
    fn test_consonant_miss_earns_nothing() {
        let mut s = state("JAWS", &[]);
        s.spin_value = 900;

        let r = resolve_letter(&mut s, 'Z', Side::Player);

        assert!(!r.hit);
        assert_eq!(r.earned, 0);
        assert!(s.is_used('Z'));
        assert_eq!(s.round_score.player, 0);
    }

    #[test]
    fn test_player_vowel_costs_on_hit_and_miss() {
        let mut s = state("JAWS", &[]);
        s.round_score.player = 600;

        let hit = resolve_letter(&mut s, 'A', Side::Player);
        assert!(hit.hit);
        assert_eq!(s.round_score.player, 350);

        let miss = resolve_letter(&mut s, 'E', Side::Player);
        assert!(!miss.hit);
        assert_eq!(s.round_score.player, 100);
    }

    #[test]
    fn test_opponent_vowel_not_charged_here() {
        let mut s = state("JAWS", &[]);
        s.round_score.opponent = 400;

        resolve_letter(&mut s, 'A', Side::Opponent);
        assert_eq!(s.round_score.opponent, 400);
    }

    #[test]
    fn test_vowel_never_earns_even_with_value_in_play() {
        let mut s = state("BANANA", &[]);
        s.spin_value = 1000;
        s.round_score.player = 250;

        let r = resolve_letter(&mut s, 'A', Side::Player);
        assert_eq!(r.count, 3);
        assert_eq!(r.earned, 0);
        assert_eq!(s.round_score.player, 0);
    }

    fn answers() -> impl Strategy<Value = String> {
        "[A-Z]{1,7}( [A-Z]{1,7}){0,3}"
    }

    proptest! {
        #[test]
        fn prop_resolve_reveals_every_hidden_occurrence(
            answer in answers(),
            pre in proptest::collection::vec(proptest::char::range('A', 'Z'), 0..5),
            letter in proptest::char::range('A', 'Z'),
        ) {
            let mut s = state(&answer, &[]);
            for c in &pre {
                if *c != letter {
                    reveal_letter(&mut s, *c);
                }
            }
            let before = s.revealed.clone();
            let expected = answer.chars().filter(|c| *c == letter).count();

            let r = resolve_letter(&mut s, letter, Side::Opponent);

            prop_assert_eq!(r.count, expected);
            prop_assert_eq!(s.revealed.len(), before.len() + expected);
            prop_assert!(s.is_used(letter));
            prop_assert!(before.is_subset(&s.revealed));
            for i in &s.revealed {
                prop_assert_ne!(answer.as_bytes()[*i], b' ');
            }
        }

        #[test]
        fn prop_consonant_score_is_count_times_value(
            answer in answers(),
            letter in proptest::char::range('A', 'Z'),
            value in 1u32..2000,
        ) {
            prop_assume!(is_consonant(letter));
            let mut s = state(&answer, &[]);
            s.spin_value = value;

            let r = resolve_letter(&mut s, letter, Side::Player);
            prop_assert_eq!(s.round_score.player, r.count as u32 * value);
        }

        #[test]
        fn prop_solved_iff_every_letter_revealed(answer in answers()) {
            let mut s = state(&answer, &[]);
            let distinct: std::collections::BTreeSet<char> =
                answer.chars().filter(|c| *c != ' ').collect();

            for (n, c) in distinct.iter().enumerate() {
                prop_assert!(!s.is_solved(), "solved after only {} letters", n);
                reveal_letter(&mut s, *c);
            }
            prop_assert!(s.is_solved());
        }
    }
}
