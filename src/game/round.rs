//! Round state
//!
//! `RoundState` is the single aggregate describing the round in play. The
//! engine mutates it; the front-end only reads snapshots of it. The `can_*`
//! queries are the legality rules every request is checked against.

use super::catalog::Puzzle;
use super::letters;
use super::wheel::WheelSegment;
use super::{is_consonant, is_vowel, Phase, Scores, Side, VOWELS, VOWEL_COST};
use std::collections::BTreeSet;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(Side),
    Draw,
}

/// Everything about the round in play.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// 1-based round number
    pub round: u32,
    pub max_rounds: u32,
    pub turn: Side,
    pub phase: Phase,
    pub puzzle: Puzzle,
    /// Face-up positions in `puzzle.answer`; never contains a space position
    pub revealed: BTreeSet<usize>,
    /// Every letter tried, bought or pre-revealed this round
    pub used_letters: BTreeSet<char>,
    /// Dollar value in play, 0 when none
    pub spin_value: u32,
    pub round_score: Scores,
    /// Carried across rounds
    pub total_score: Scores,
    /// An action is in flight
    pub locked: bool,
    pub sudden_death: bool,
    /// Most recent wheel result this round
    pub last_spin: Option<&'static WheelSegment>,
    pub outcome: Option<RoundOutcome>,
}

impl RoundState {
    /// Fresh round with the given letters already face-up and used.
    pub fn new(
        round: u32,
        max_rounds: u32,
        puzzle: Puzzle,
        total_score: Scores,
        pre_revealed: &[char],
    ) -> Self {
        let mut state = Self {
            round,
            max_rounds,
            turn: Side::Player,
            phase: Phase::Spin,
            puzzle,
            revealed: BTreeSet::new(),
            used_letters: BTreeSet::new(),
            spin_value: 0,
            round_score: Scores::default(),
            total_score,
            locked: false,
            sudden_death: false,
            last_spin: None,
            outcome: None,
        };

        for letter in pre_revealed {
            letters::reveal_letter(&mut state, *letter);
        }
        state
    }

    /// Number of letter tiles.
    pub fn letter_count(&self) -> usize {
        self.puzzle.letter_count()
    }

    /// Share of letter tiles face-up, in `0.0..=1.0`.
    pub fn revealed_fraction(&self) -> f64 {
        self.revealed.len() as f64 / self.letter_count().max(1) as f64
    }

    /// Every non-space position is face-up.
    pub fn is_solved(&self) -> bool {
        self.puzzle
            .answer
            .chars()
            .enumerate()
            .all(|(i, c)| c == ' ' || self.revealed.contains(&i))
    }

    /// The tile at `index` if it is shown (spaces are always shown).
    pub fn visible_char(&self, index: usize) -> Option<char> {
        let c = self.puzzle.answer.chars().nth(index)?;
        (c == ' ' || self.revealed.contains(&index)).then_some(c)
    }

    pub fn is_used(&self, letter: char) -> bool {
        self.used_letters.contains(&letter)
    }

    /// The letter appears somewhere in the answer.
    pub fn in_answer(&self, letter: char) -> bool {
        self.puzzle.answer.contains(letter)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Unused vowels that appear in the answer, in `A E I O U` order.
    pub fn unused_vowels_in_answer(&self) -> Vec<char> {
        VOWELS
            .iter()
            .copied()
            .filter(|v| !self.is_used(*v) && self.in_answer(*v))
            .collect()
    }

    pub fn has_unused_vowel_in_answer(&self) -> bool {
        VOWELS.iter().any(|v| !self.is_used(*v) && self.in_answer(*v))
    }

    pub fn has_unused_consonant_in_answer(&self) -> bool {
        self.puzzle
            .answer
            .chars()
            .any(|c| is_consonant(c) && !self.is_used(c))
    }

    /// Some consonant, in the answer or not, has not been called yet.
    pub fn has_unused_consonant(&self) -> bool {
        ('A'..='Z').any(|c| is_consonant(c) && !self.is_used(c))
    }

    /// The sudden-death solve window is open to the player.
    pub fn solve_window_open(&self) -> bool {
        self.sudden_death && !self.locked && self.turn == Side::Player && !self.is_over()
    }

    fn may_act(&self, by: Side) -> bool {
        !self.is_over() && self.turn == by && !self.locked
    }

    /// `by` may spin the wheel.
    pub fn can_spin(&self, by: Side) -> bool {
        self.may_act(by) && !self.sudden_death && self.phase == Phase::Spin
    }

    /// `by` may buy a vowel.
    pub fn can_buy_vowel(&self, by: Side) -> bool {
        self.may_act(by)
            && !self.sudden_death
            && matches!(self.phase, Phase::Spin | Phase::Guess)
            && self.round_score[by] >= VOWEL_COST
            && self.has_unused_vowel_in_answer()
    }

    /// `by` may call `letter` now.
    pub fn can_guess(&self, by: Side, letter: char) -> bool {
        if !self.may_act(by) || self.sudden_death || self.is_used(letter) {
            return false;
        }
        match self.phase {
            Phase::Guess => is_consonant(letter),
            Phase::BuyVowel => is_vowel(letter),
            Phase::Spin => false,
        }
    }

    /// `by` may attempt to solve.
    pub fn can_solve(&self, by: Side) -> bool {
        self.may_act(by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(answer: &str, pre: &[char]) -> RoundState {
        let puzzle = Puzzle::new("PHRASE", answer).unwrap();
        RoundState::new(1, 3, puzzle, Scores::default(), pre)
    }

    #[test]
    fn test_new_round_defaults() {
        let s = state("BIRDS OF A FEATHER", &[]);

        assert_eq!(s.turn, Side::Player);
        assert_eq!(s.phase, Phase::Spin);
        assert_eq!(s.spin_value, 0);
        assert!(s.revealed.is_empty());
        assert!(s.used_letters.is_empty());
        assert!(!s.locked);
        assert!(!s.is_over());
        assert_eq!(s.letter_count(), 15);
    }

    #[test]
    fn test_pre_reveal_marks_used_and_face_up() {
        let s = state("BIRDS OF A FEATHER", &['R', 'S', 'T', 'L']);

        // R x2, S x1, T x1, L absent
        assert_eq!(s.revealed.len(), 4);
        assert!(s.is_used('L'));
        assert_eq!(s.visible_char(2), Some('R'));
        assert_eq!(s.visible_char(0), None);
        assert_eq!(s.visible_char(5), Some(' '));
    }

    #[test]
    fn test_revealed_fraction_and_solved() {
        let mut s = state("AB CD", &[]);
        assert_eq!(s.revealed_fraction(), 0.0);
        assert!(!s.is_solved());

        s.revealed.extend([0, 1]);
        assert_eq!(s.revealed_fraction(), 0.5);

        s.revealed.extend([3, 4]);
        assert!(s.is_solved());
        assert_eq!(s.revealed_fraction(), 1.0);
    }

    #[test]
    fn test_unused_letter_queries() {
        let mut s = state("MOUSE TRAP", &[]);
        assert_eq!(s.unused_vowels_in_answer(), vec!['A', 'E', 'O', 'U']);
        assert!(s.has_unused_consonant_in_answer());

        for c in ['M', 'S', 'T', 'R', 'P', 'A', 'E', 'O', 'U'] {
            s.used_letters.insert(c);
        }
        assert!(!s.has_unused_vowel_in_answer());
        assert!(!s.has_unused_consonant_in_answer());
        assert!(s.has_unused_consonant());

        for c in "BCDFGHJKLNQVWXYZ".chars() {
            s.used_letters.insert(c);
        }
        assert!(!s.has_unused_consonant());
    }

    #[test]
    fn test_can_spin_rules() {
        let mut s = state("JAWS", &[]);
        assert!(s.can_spin(Side::Player));
        assert!(!s.can_spin(Side::Opponent));

        s.locked = true;
        assert!(!s.can_spin(Side::Player));
        s.locked = false;

        s.phase = Phase::Guess;
        assert!(!s.can_spin(Side::Player));
    }

    #[test]
    fn test_can_buy_vowel_needs_funds_and_vowels() {
        let mut s = state("JAWS", &[]);
        assert!(!s.can_buy_vowel(Side::Player));

        s.round_score.player = VOWEL_COST;
        assert!(s.can_buy_vowel(Side::Player));

        s.phase = Phase::Guess;
        assert!(s.can_buy_vowel(Side::Player));

        s.phase = Phase::BuyVowel;
        assert!(!s.can_buy_vowel(Side::Player));

        s.phase = Phase::Spin;
        s.used_letters.insert('A');
        assert!(!s.can_buy_vowel(Side::Player));
    }

    #[test]
    fn test_can_guess_matches_phase_class() {
        let mut s = state("JAWS", &[]);
        assert!(!s.can_guess(Side::Player, 'J'), "must spin first");

        s.phase = Phase::Guess;
        assert!(s.can_guess(Side::Player, 'J'));
        assert!(s.can_guess(Side::Player, 'Z'));
        assert!(!s.can_guess(Side::Player, 'A'));
        assert!(!s.can_guess(Side::Player, 'j'));

        s.phase = Phase::BuyVowel;
        assert!(s.can_guess(Side::Player, 'A'));
        assert!(!s.can_guess(Side::Player, 'J'));

        s.used_letters.insert('A');
        assert!(!s.can_guess(Side::Player, 'A'));
    }

    #[test]
    fn test_sudden_death_only_allows_solving_in_window() {
        let mut s = state("JAWS", &[]);
        s.round_score.player = 500;
        s.sudden_death = true;
        s.locked = true;

        assert!(!s.can_solve(Side::Player));
        assert!(!s.solve_window_open());

        s.locked = false;
        assert!(s.solve_window_open());
        assert!(s.can_solve(Side::Player));
        assert!(!s.can_spin(Side::Player));
        assert!(!s.can_buy_vowel(Side::Player));

        s.phase = Phase::Guess;
        assert!(!s.can_guess(Side::Player, 'J'));
    }

    #[test]
    fn test_nothing_enabled_after_round_ends() {
        let mut s = state("JAWS", &[]);
        s.outcome = Some(RoundOutcome::Draw);

        assert!(!s.can_spin(Side::Player));
        assert!(!s.can_solve(Side::Player));
    }
}
