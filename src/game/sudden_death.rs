//! Deadlock detection and the sudden-death tie-break
//!
//! A round deadlocks when every consonant is used, a vowel is still hidden,
//! and neither side can afford to buy it. The engine then reveals the
//! remaining vowels one by one, opens a short solve window to the player,
//! gives the opponent one solve check, and otherwise calls a draw.

use super::round::RoundState;
use super::VOWEL_COST;

/// Revealed fraction the opponent needs before its sudden-death solve check.
pub const OPPONENT_REVEAL_GATE: f64 = 0.7;

/// Chance the opponent's sudden-death solve check succeeds.
pub const OPPONENT_SOLVE_CHANCE: f64 = 0.7;

/// Normal play cannot continue.
pub fn is_deadlocked(state: &RoundState) -> bool {
    !state.has_unused_consonant_in_answer()
        && state.round_score.player < VOWEL_COST
        && state.round_score.opponent < VOWEL_COST
        && state.has_unused_vowel_in_answer()
}

/// Vowels the house turns over, in reveal order.
pub fn reveal_order(state: &RoundState) -> Vec<char> {
    state.unused_vowels_in_answer()
}

/// The opponent may attempt its sudden-death solve.
pub fn opponent_may_solve(state: &RoundState) -> bool {
    state.revealed_fraction() > OPPONENT_REVEAL_GATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::Puzzle;
    use crate::game::letters::reveal_letter;
    use crate::game::{is_consonant, is_vowel, Scores, VOWELS};
    use proptest::prelude::*;

    fn state(answer: &str, used: &str) -> RoundState {
        let puzzle = Puzzle::new("THING", answer).unwrap();
        let mut s = RoundState::new(1, 3, puzzle, Scores::default(), &[]);
        for c in used.chars() {
            reveal_letter(&mut s, c);
        }
        s
    }

    #[test]
    fn test_deadlock_when_only_vowels_left_and_broke() {
        let s = state("PIGGY BANK", "PGYBNK");
        assert!(is_deadlocked(&s));
        assert_eq!(reveal_order(&s), vec!['A', 'I']);
    }

    #[test]
    fn test_no_deadlock_if_either_side_can_buy() {
        let mut s = state("PIGGY BANK", "PGYBNK");

        s.round_score.opponent = VOWEL_COST;
        assert!(!is_deadlocked(&s));

        s.round_score.opponent = 0;
        s.round_score.player = 300;
        assert!(!is_deadlocked(&s));
    }

    #[test]
    fn test_no_deadlock_with_consonant_left() {
        let s = state("PIGGY BANK", "PGYBN");
        assert!(!is_deadlocked(&s));
    }

    #[test]
    fn test_no_deadlock_without_hidden_vowel() {
        let s = state("PIGGY BANK", "PGYBNKAI");
        assert!(!is_deadlocked(&s));
    }

    #[test]
    fn test_reveal_order_follows_vowel_order() {
        let s = state("OUTSIDE THE BOX", "TSDHBX");
        assert_eq!(reveal_order(&s), vec!['E', 'I', 'O', 'U']);
    }

    #[test]
    fn test_opponent_gate_is_strict() {
        // 7 of 10 letters showing is exactly 0.7: not enough
        let s = state("ABCDEFGHIJ", "ABCDEFG");
        assert!(!opponent_may_solve(&s));

        let s = state("ABCDEFGHIJ", "ABCDEFGH");
        assert!(opponent_may_solve(&s));
    }

    proptest! {
        #[test]
        fn prop_deadlock_matches_definition(
            answer in "[A-Z]{1,7}( [A-Z]{1,7}){0,2}",
            used in proptest::collection::btree_set(proptest::char::range('A', 'Z'), 0..26),
            player in 0u32..600,
            opponent in 0u32..600,
        ) {
            let puzzle = Puzzle::new("THING", &answer).unwrap();
            let mut s = RoundState::new(1, 3, puzzle, Scores::default(), &[]);
            s.used_letters = used.clone();
            s.round_score = Scores { player, opponent };

            let consonant_left = answer.chars().any(|c| is_consonant(c) && !used.contains(&c));
            let vowel_left = VOWELS.iter().any(|v| answer.contains(*v) && !used.contains(v));
            let broke = player < VOWEL_COST && opponent < VOWEL_COST;

            prop_assert_eq!(is_deadlocked(&s), !consonant_left && broke && vowel_left);
            prop_assert!(reveal_order(&s).iter().all(|c| is_vowel(*c) && !used.contains(c)));
        }
    }
}
