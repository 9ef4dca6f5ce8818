//! Round and turn engine
//!
//! `GameEngine` owns the round state and is the only thing that mutates it.
//! Requests from either side are checked against the `can_*` rules and
//! silently dropped when not allowed. Everything that happens "a moment
//! later" (the wheel landing, the opponent thinking, sudden-death reveals)
//! is a continuation on the scheduler, stamped with the round, turn and
//! generation it was queued under. A continuation whose stamp no longer
//! matches is stale and is dropped.

use super::catalog::PuzzleCatalog;
use super::difficulty::Difficulty;
use super::letters::{self, Resolution};
use super::opponent::{Opponent, OpponentMove};
use super::pacing::Pacing;
use super::random::RandomSource;
use super::round::{RoundOutcome, RoundState};
use super::schedule::Scheduler;
use super::sudden_death;
use super::wheel::{self, SegmentEffect, WheelSegment};
use super::{is_consonant, Phase, Scores, Side, VOWEL_COST};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;

/// Choices fixed for a whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub max_rounds: u32,
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Final verdict on the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    PlayerWins { margin: u32 },
    OpponentWins { margin: u32 },
    Tie,
}

impl GameResult {
    pub fn from_totals(totals: Scores) -> Self {
        use std::cmp::Ordering;
        match totals.player.cmp(&totals.opponent) {
            Ordering::Greater => GameResult::PlayerWins {
                margin: totals.player - totals.opponent,
            },
            Ordering::Less => GameResult::OpponentWins {
                margin: totals.opponent - totals.player,
            },
            Ordering::Equal => GameResult::Tie,
        }
    }
}

/// Answer to `start_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStart {
    Started,
    /// The last round has been played
    GameComplete(GameResult),
    /// The current round has not ended yet
    StillPlaying,
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InRound,
    RoundOver(RoundOutcome),
    GameOver(GameResult),
}

/// Things that happened, for the front-end to narrate.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted { round: u32, category: String },
    WheelSpinning { by: Side },
    WheelLanded { by: Side, segment: &'static WheelSegment },
    OpponentThinking,
    VowelBought { by: Side },
    LetterCalled { by: Side, letter: char },
    LetterResolved { by: Side, letter: char, count: usize, earned: u32 },
    SolveAttempt { by: Side, correct: bool },
    TurnPassed { to: Side },
    SuddenDeathStarted { vowels: Vec<char> },
    VowelRevealed { vowel: char, count: usize },
    SolveWindowOpened { window: Duration },
    RoundEnded { outcome: RoundOutcome, earned: u32 },
    GameOver { result: GameResult },
}

/// Identity of the moment a continuation was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    round: u32,
    turn: Side,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    WheelLanded { by: Side, segment: &'static WheelSegment },
    OpponentTurn,
    OpponentDecide,
    OpponentChooseConsonant,
    Guess { by: Side, letter: char },
    FinishGuess { by: Side, resolution: Resolution },
    OpponentSolve,
    SwitchTurn,
    StartSuddenDeath,
    RevealVowel(char),
    OpenSolveWindow,
    CloseSolveWindow,
    SuddenDeathOpponentCheck,
    DeclareDraw,
}

#[derive(Debug)]
struct Scheduled {
    stamp: Stamp,
    action: Continuation,
}

/// The game: settings, puzzle supply, the round in play and its timers.
#[derive(Debug)]
pub struct GameEngine<R: RandomSource = StdRng> {
    settings: GameSettings,
    opponent: Opponent,
    catalog: PuzzleCatalog,
    used_puzzles: HashSet<usize>,
    state: RoundState,
    game_over: Option<GameResult>,
    scheduler: Scheduler<Scheduled>,
    pacing: Pacing,
    rng: R,
    events: Vec<GameEvent>,
    generation: u64,
    solve_window_deadline: Option<Duration>,
}

impl GameEngine<StdRng> {
    /// Start a game on the built-in catalog, seeded for replay if asked.
    pub fn with_seed(settings: GameSettings, pacing: Pacing, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::start_game(settings, PuzzleCatalog::standard(), pacing, rng)
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create the game and start round 1.
    pub fn start_game(
        settings: GameSettings,
        catalog: PuzzleCatalog,
        pacing: Pacing,
        mut rng: R,
    ) -> Self {
        let settings = GameSettings {
            max_rounds: settings.max_rounds.max(1),
            ..settings
        };
        let profile = settings.difficulty.profile();
        let mut used_puzzles = HashSet::new();
        let state = Self::deal(&catalog, &mut used_puzzles, &mut rng, &settings, 1, Scores::default());

        info!(
            "new game: {} rounds on {}, {} puzzles in the catalog",
            settings.max_rounds,
            settings.difficulty,
            catalog.len()
        );

        let mut engine = Self {
            settings,
            opponent: Opponent::new(profile),
            catalog,
            used_puzzles,
            state,
            game_over: None,
            scheduler: Scheduler::new(),
            pacing,
            rng,
            events: Vec::new(),
            generation: 0,
            solve_window_deadline: None,
        };
        engine.announce_round();
        engine
    }

    fn deal(
        catalog: &PuzzleCatalog,
        used_puzzles: &mut HashSet<usize>,
        rng: &mut R,
        settings: &GameSettings,
        round: u32,
        totals: Scores,
    ) -> RoundState {
        let (puzzle, index) = catalog.select_puzzle(used_puzzles, rng);
        debug!("round {} uses puzzle #{}", round, index);
        RoundState::new(
            round,
            settings.max_rounds,
            puzzle,
            totals,
            settings.difficulty.profile().pre_revealed,
        )
    }

    fn announce_round(&mut self) {
        info!(
            "round {}/{} started ({})",
            self.state.round, self.state.max_rounds, self.state.puzzle.category
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.state.round,
            category: self.state.puzzle.category.clone(),
        });
    }

    /// Begin the next round, or finish the game after the last one.
    pub fn start_round(&mut self) -> RoundStart {
        if let Some(result) = self.game_over {
            return RoundStart::GameComplete(result);
        }
        if !self.state.is_over() {
            debug!("start_round ignored: round {} still in play", self.state.round);
            return RoundStart::StillPlaying;
        }

        if self.state.round >= self.settings.max_rounds {
            let result = GameResult::from_totals(self.state.total_score);
            info!("game over: {:?} ({:?})", result, self.state.total_score);
            self.game_over = Some(result);
            self.events.push(GameEvent::GameOver { result });
            return RoundStart::GameComplete(result);
        }

        let next = self.state.round + 1;
        self.state = Self::deal(
            &self.catalog,
            &mut self.used_puzzles,
            &mut self.rng,
            &self.settings,
            next,
            self.state.total_score,
        );
        self.bump_generation();
        self.announce_round();
        RoundStart::Started
    }

    /// Start over with the same settings: totals and puzzle history reset.
    pub fn play_again(&mut self) {
        self.used_puzzles.clear();
        self.scheduler.clear();
        self.game_over = None;
        self.solve_window_deadline = None;
        self.state = Self::deal(
            &self.catalog,
            &mut self.used_puzzles,
            &mut self.rng,
            &self.settings,
            1,
            Scores::default(),
        );
        self.bump_generation();
        info!("playing again");
        self.announce_round();
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Direct access for setting up board positions in tests.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut RoundState {
        &mut self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        if let Some(result) = self.game_over {
            GameStatus::GameOver(result)
        } else if let Some(outcome) = self.state.outcome {
            GameStatus::RoundOver(outcome)
        } else {
            GameStatus::InRound
        }
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Time left in the sudden-death solve window, if it is open.
    pub fn solve_window_remaining(&self) -> Option<Duration> {
        if !self.state.solve_window_open() {
            return None;
        }
        self.solve_window_deadline
            .map(|deadline| deadline.saturating_sub(self.scheduler.now()))
    }

    /// Number of queued continuations.
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    // ── Requests ──────────────────────────────────────────────

    pub fn request_spin(&mut self, by: Side) {
        if !self.state.can_spin(by) {
            debug!("spin by {:?} ignored", by);
            return;
        }
        self.spin(by);
    }

    pub fn request_buy_vowel(&mut self, by: Side) {
        if !self.state.can_buy_vowel(by) {
            debug!("vowel purchase by {:?} ignored", by);
            return;
        }
        self.buy_vowel(by);
    }

    pub fn request_guess(&mut self, by: Side, letter: char) {
        let letter = letter.to_ascii_uppercase();
        if !self.state.can_guess(by, letter) {
            debug!("guess {:?} by {:?} ignored", letter, by);
            return;
        }
        self.call_letter(by, letter);
    }

    pub fn request_solve(&mut self, by: Side, guess: &str) {
        if !self.state.can_solve(by) {
            debug!("solve by {:?} ignored", by);
            return;
        }
        let guess = guess.trim().to_uppercase();
        if guess.is_empty() {
            debug!("empty solve by {:?} ignored", by);
            return;
        }

        let correct = guess == self.state.puzzle.answer;
        self.events.push(GameEvent::SolveAttempt { by, correct });
        if correct {
            self.end_round(RoundOutcome::Won(by));
        } else {
            debug!("{:?} guessed {:?}", by, guess);
            self.state.locked = true;
            self.schedule(self.pacing.wrong_solve_pause, Continuation::SwitchTurn);
        }
    }

    // ── Clock ─────────────────────────────────────────────────

    /// Move the clock and run everything that has come due.
    pub fn advance(&mut self, dt: Duration) {
        let deadline = self.scheduler.now() + dt;
        while let Some(next) = self.scheduler.pop_until(deadline) {
            self.run(next);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Run the next continuation whatever its delay. False when idle.
    #[allow(dead_code)]
    pub fn step(&mut self) -> bool {
        match self.scheduler.pop_next() {
            Some(next) => {
                self.run(next);
                true
            }
            None => false,
        }
    }

    /// Run continuations until nothing is queued.
    #[allow(dead_code)]
    pub fn run_until_idle(&mut self) {
        while self.step() {}
    }

    // ── Internals ─────────────────────────────────────────────

    fn stamp(&self) -> Stamp {
        Stamp {
            round: self.state.round,
            turn: self.state.turn,
            generation: self.generation,
        }
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
    }

    fn schedule(&mut self, delay: Duration, action: Continuation) {
        let stamp = self.stamp();
        self.scheduler.schedule(delay, Scheduled { stamp, action });
    }

    fn run(&mut self, next: Scheduled) {
        if next.stamp != self.stamp() || self.state.is_over() {
            debug!("dropping stale {:?}", next.action);
            return;
        }
        trace!("running {:?}", next.action);

        match next.action {
            Continuation::WheelLanded { by, segment } => self.wheel_landed(by, segment),
            Continuation::OpponentTurn => self.opponent_turn(),
            Continuation::OpponentDecide => self.opponent_decide(),
            Continuation::OpponentChooseConsonant => self.opponent_choose_consonant(),
            Continuation::Guess { by, letter } => self.call_letter(by, letter),
            Continuation::FinishGuess { by, resolution } => self.finish_guess(by, resolution),
            Continuation::OpponentSolve => self.end_round(RoundOutcome::Won(Side::Opponent)),
            Continuation::SwitchTurn => self.switch_turn(),
            Continuation::StartSuddenDeath => self.start_sudden_death(),
            Continuation::RevealVowel(vowel) => self.reveal_vowel(vowel),
            Continuation::OpenSolveWindow => self.open_solve_window(),
            Continuation::CloseSolveWindow => self.close_solve_window(),
            Continuation::SuddenDeathOpponentCheck => self.sudden_death_opponent_check(),
            Continuation::DeclareDraw => self.end_round(RoundOutcome::Draw),
        }
    }

    fn spin(&mut self, by: Side) {
        self.state.locked = true;
        let segment = wheel::spin(&mut self.rng);
        debug!("{:?} spins, wheel will land on {}", by, segment.label);
        self.events.push(GameEvent::WheelSpinning { by });
        self.schedule(
            self.pacing.wheel_spin,
            Continuation::WheelLanded { by, segment },
        );
    }

    fn wheel_landed(&mut self, by: Side, segment: &'static WheelSegment) {
        self.state.last_spin = Some(segment);
        self.events.push(GameEvent::WheelLanded { by, segment });

        match segment.effect {
            SegmentEffect::Cash(value) => {
                self.state.spin_value = value;
                self.state.phase = Phase::Guess;
                if by == Side::Player {
                    if self.state.has_unused_consonant() {
                        self.state.locked = false;
                    } else {
                        debug!("player has no consonant left to call");
                        self.schedule(self.pacing.miss_pause, Continuation::SwitchTurn);
                    }
                } else {
                    self.schedule(
                        self.pacing.consonant_choice,
                        Continuation::OpponentChooseConsonant,
                    );
                }
            }
            SegmentEffect::Bankrupt => {
                self.state.round_score[by] = 0;
                self.schedule(self.pacing.penalty_pause, Continuation::SwitchTurn);
            }
            SegmentEffect::LoseTurn => {
                self.schedule(self.pacing.penalty_pause, Continuation::SwitchTurn);
            }
        }
    }

    fn buy_vowel(&mut self, by: Side) {
        // The player pays when the vowel resolves
        if by == Side::Opponent {
            self.state.round_score.opponent =
                self.state.round_score.opponent.saturating_sub(VOWEL_COST);
        }
        self.state.phase = Phase::BuyVowel;
        self.state.spin_value = 0;
        self.events.push(GameEvent::VowelBought { by });
    }

    fn call_letter(&mut self, by: Side, letter: char) {
        self.state.locked = true;
        self.events.push(GameEvent::LetterCalled { by, letter });

        let resolution = letters::resolve_letter(&mut self.state, letter, by);
        debug!(
            "{:?} called {}: {} tile(s), earned {}",
            by, letter, resolution.count, resolution.earned
        );
        self.events.push(GameEvent::LetterResolved {
            by,
            letter,
            count: resolution.count,
            earned: resolution.earned,
        });
        self.schedule(
            self.pacing.settle(resolution.count),
            Continuation::FinishGuess { by, resolution },
        );
    }

    fn finish_guess(&mut self, by: Side, resolution: Resolution) {
        if self.state.is_solved() {
            self.end_round(RoundOutcome::Won(by));
            return;
        }

        if resolution.hit && is_consonant(resolution.letter) {
            self.state.phase = Phase::Spin;
            self.state.spin_value = 0;
            self.state.locked = false;
            if by == Side::Opponent {
                self.schedule(self.pacing.opponent_continue, Continuation::OpponentTurn);
            }
        } else {
            self.schedule(self.pacing.miss_pause, Continuation::SwitchTurn);
        }
    }

    fn switch_turn(&mut self) {
        self.state.turn = self.state.turn.other();
        self.state.phase = Phase::Spin;
        self.state.spin_value = 0;
        self.state.locked = false;
        self.bump_generation();
        self.events.push(GameEvent::TurnPassed { to: self.state.turn });

        if self.state.sudden_death {
            self.state.locked = true;
            if self.state.turn == Side::Opponent {
                self.events.push(GameEvent::OpponentThinking);
                self.schedule(
                    self.pacing.sudden_death_opponent_think,
                    Continuation::SuddenDeathOpponentCheck,
                );
            }
        } else if sudden_death::is_deadlocked(&self.state) {
            info!("round {} deadlocked", self.state.round);
            self.state.locked = true;
            self.schedule(self.pacing.deadlock_pause, Continuation::StartSuddenDeath);
        } else if self.state.turn == Side::Opponent {
            self.schedule(self.pacing.opponent_handoff, Continuation::OpponentTurn);
        }
    }

    fn opponent_turn(&mut self) {
        let s = &self.state;
        if s.turn != Side::Opponent || s.phase != Phase::Spin || s.locked || s.sudden_death {
            debug!("opponent turn skipped");
            return;
        }
        self.state.locked = true;
        self.events.push(GameEvent::OpponentThinking);
        self.schedule(self.pacing.opponent_think, Continuation::OpponentDecide);
    }

    fn opponent_decide(&mut self) {
        match self.opponent.decide_turn(&self.state, &mut self.rng) {
            OpponentMove::Solve => {
                self.events.push(GameEvent::SolveAttempt {
                    by: Side::Opponent,
                    correct: true,
                });
                self.schedule(self.pacing.opponent_solve, Continuation::OpponentSolve);
            }
            OpponentMove::BuyVowel(vowel) => {
                self.buy_vowel(Side::Opponent);
                self.schedule(
                    self.pacing.vowel_announce,
                    Continuation::Guess {
                        by: Side::Opponent,
                        letter: vowel,
                    },
                );
            }
            OpponentMove::Spin => self.spin(Side::Opponent),
        }
    }

    fn opponent_choose_consonant(&mut self) {
        match self.opponent.pick_consonant(&self.state, &mut self.rng) {
            Some(letter) => {
                debug!("opponent picks {}", letter);
                self.schedule(
                    self.pacing.letter_announce,
                    Continuation::Guess {
                        by: Side::Opponent,
                        letter,
                    },
                );
            }
            None => {
                debug!("opponent has no consonant left to call");
                self.switch_turn();
            }
        }
    }

    fn start_sudden_death(&mut self) {
        if self.state.sudden_death {
            return;
        }
        let vowels = sudden_death::reveal_order(&self.state);
        info!("sudden death in round {}: revealing {:?}", self.state.round, vowels);

        self.state.sudden_death = true;
        self.state.locked = true;
        self.state.phase = Phase::Spin;
        self.state.spin_value = 0;
        self.bump_generation();
        self.events.push(GameEvent::SuddenDeathStarted {
            vowels: vowels.clone(),
        });

        for (n, vowel) in vowels.iter().enumerate() {
            self.schedule(
                self.pacing.sudden_death_reveal(n),
                Continuation::RevealVowel(*vowel),
            );
        }
        let open_at = self.pacing.sudden_death_reveal(vowels.len()) + self.pacing.solve_window_delay;
        self.schedule(open_at, Continuation::OpenSolveWindow);
    }

    fn reveal_vowel(&mut self, vowel: char) {
        let count = letters::reveal_letter(&mut self.state, vowel);
        self.events.push(GameEvent::VowelRevealed { vowel, count });
    }

    fn open_solve_window(&mut self) {
        self.state.turn = Side::Player;
        self.state.locked = false;
        self.bump_generation();
        self.solve_window_deadline = Some(self.scheduler.now() + self.pacing.solve_window);
        self.events.push(GameEvent::SolveWindowOpened {
            window: self.pacing.solve_window,
        });
        self.schedule(self.pacing.solve_window, Continuation::CloseSolveWindow);
    }

    fn close_solve_window(&mut self) {
        self.solve_window_deadline = None;
        if self.state.solve_window_open() {
            debug!("solve window closed without an answer");
            self.switch_turn();
        }
    }

    fn sudden_death_opponent_check(&mut self) {
        if self.opponent.sudden_death_solve(&self.state, &mut self.rng) {
            self.events.push(GameEvent::SolveAttempt {
                by: Side::Opponent,
                correct: true,
            });
            self.schedule(self.pacing.sudden_death_verdict, Continuation::OpponentSolve);
        } else {
            self.schedule(self.pacing.draw_verdict, Continuation::DeclareDraw);
        }
    }

    fn end_round(&mut self, outcome: RoundOutcome) {
        let earned = match outcome {
            RoundOutcome::Won(side) => {
                let earned = self.state.round_score[side];
                self.state.total_score[side] += earned;
                earned
            }
            RoundOutcome::Draw => 0,
        };

        let answer_len = self.state.puzzle.answer.len();
        let letter_positions: Vec<usize> = (0..answer_len)
            .filter(|i| self.state.puzzle.answer.as_bytes()[*i] != b' ')
            .collect();
        self.state.revealed.extend(letter_positions);

        self.state.locked = true;
        self.state.sudden_death = false;
        self.state.outcome = Some(outcome);
        self.solve_window_deadline = None;
        self.bump_generation();

        info!(
            "round {} ended: {:?}, totals {:?}",
            self.state.round, outcome, self.state.total_score
        );
        self.events.push(GameEvent::RoundEnded { outcome, earned });
    }
}
