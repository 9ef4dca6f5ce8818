//! Play-screen state
//!
//! `App` sits between the keyboard and the engine: it turns key presses
//! into engine requests and engine events into the banner line and the
//! running log. It never changes the round itself.

use crate::game::random::RandomSource;
use crate::game::{
    GameEngine, GameEvent, GameResult, GameStatus, RoundOutcome, RoundStart, RoundState,
    Side,
};
use log::debug;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::Duration;

/// Lines kept in the running log.
pub const LOG_CAPACITY: usize = 8;

/// What typed characters do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are game actions
    Play,
    /// Keys are typed into a solve attempt
    Solving { input: String },
}

/// Colour hint for the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Money,
    Bad,
}

/// The line of narration above the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub tone: Tone,
}

impl Banner {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// How a key on the on-screen keyboard is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Called and found
    Hit,
    /// Called and not in the answer
    Miss,
    /// The player could call it now
    Available,
    Disabled,
}

/// A game in progress, as seen from the keyboard.
pub struct App<R: RandomSource = StdRng> {
    engine: GameEngine<R>,
    pub mode: InputMode,
    pub banner: Banner,
    /// Recent narration, oldest first
    pub log: VecDeque<String>,
    log_max: usize,
}

impl<R: RandomSource> App<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let mut app = Self {
            engine,
            mode: InputMode::Play,
            banner: Banner::new("", Tone::Neutral),
            log: VecDeque::new(),
            log_max: LOG_CAPACITY,
        };
        app.absorb_events();
        app
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn state(&self) -> &RoundState {
        self.engine.state()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    /// Text typed so far in the solve prompt.
    pub fn solve_input(&self) -> Option<&str> {
        match &self.mode {
            InputMode::Solving { input } => Some(input),
            InputMode::Play => None,
        }
    }

    /// Handle a typed character.
    pub fn on_char(&mut self, c: char) {
        if let InputMode::Solving { input } = &mut self.mode {
            if c.is_ascii_alphabetic() || c == ' ' {
                input.push(c.to_ascii_uppercase());
            }
            return;
        }

        if c == ' ' {
            self.engine.request_spin(Side::Player);
        } else if c.is_ascii_alphabetic() {
            self.engine.request_guess(Side::Player, c);
        }
        self.absorb_events();
    }

    /// Tab buys a vowel.
    pub fn on_tab(&mut self) {
        if self.mode == InputMode::Play {
            self.engine.request_buy_vowel(Side::Player);
            self.absorb_events();
        }
    }

    pub fn on_backspace(&mut self) {
        if let InputMode::Solving { input } = &mut self.mode {
            input.pop();
        }
    }

    /// Enter opens or submits the solve prompt, or moves the game along
    /// once a round or the game is over.
    pub fn on_enter(&mut self) {
        if let InputMode::Solving { input } = &self.mode {
            let guess = input.clone();
            self.mode = InputMode::Play;
            self.engine.request_solve(Side::Player, &guess);
            self.absorb_events();
            return;
        }

        match self.engine.status() {
            GameStatus::InRound => {
                if self.state().can_solve(Side::Player) {
                    self.mode = InputMode::Solving {
                        input: String::new(),
                    };
                    self.banner = Banner::new("Type your answer, Enter to submit", Tone::Neutral);
                }
            }
            GameStatus::RoundOver(_) => {
                if let RoundStart::StillPlaying = self.engine.start_round() {
                    debug!("round still in play");
                }
                self.absorb_events();
            }
            GameStatus::GameOver(_) => {
                self.log.clear();
                self.engine.play_again();
                self.absorb_events();
            }
        }
    }

    /// Leave the solve prompt. False if it was not open.
    pub fn cancel_solve(&mut self) -> bool {
        if self.mode == InputMode::Play {
            return false;
        }
        self.mode = InputMode::Play;
        self.banner = Banner::new("", Tone::Neutral);
        true
    }

    /// Let `dt` of game time pass.
    pub fn tick(&mut self, dt: Duration) {
        self.engine.advance(dt);
        self.absorb_events();

        if self.mode != InputMode::Play && !self.state().can_solve(Side::Player) {
            debug!("solve prompt closed: player can no longer solve");
            self.mode = InputMode::Play;
        }
    }

    /// How `letter` should look on the on-screen keyboard.
    pub fn key_state(&self, letter: char) -> KeyState {
        let state = self.state();
        if state.is_used(letter) {
            if state.in_answer(letter) {
                KeyState::Hit
            } else {
                KeyState::Miss
            }
        } else if self.mode == InputMode::Play && state.can_guess(Side::Player, letter) {
            KeyState::Available
        } else {
            KeyState::Disabled
        }
    }

    fn absorb_events(&mut self) {
        for event in self.engine.drain_events() {
            if let Some(banner) = narrate(&event) {
                self.push_log(banner.text.clone());
                self.banner = banner;
            }
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push_back(line);
        while self.log.len() > self.log_max {
            self.log.pop_front();
        }
    }
}

/// Banner text for an engine event, if it deserves one.
fn narrate(event: &GameEvent) -> Option<Banner> {
    let banner = match event {
        GameEvent::RoundStarted { round, category } => {
            Banner::new(format!("Round {}: {}", round, category), Tone::Neutral)
        }
        GameEvent::WheelSpinning { by: Side::Player } => Banner::new("Spinning...", Tone::Neutral),
        GameEvent::WheelSpinning { by: Side::Opponent } => {
            Banner::new("Computer spins...", Tone::Neutral)
        }
        GameEvent::WheelLanded { by, segment } => match (segment.cash_value(), by) {
            (Some(value), Side::Player) => Banner::new(
                format!("{}! Call a consonant", format_money(value)),
                Tone::Money,
            ),
            (Some(value), Side::Opponent) => Banner::new(
                format!("Computer landed on {}", format_money(value)),
                Tone::Neutral,
            ),
            (None, _) => Banner::new(format!("{}: {}", by, segment.label), Tone::Bad),
        },
        GameEvent::OpponentThinking => Banner::new("Computer is thinking...", Tone::Neutral),
        GameEvent::VowelBought { by: Side::Player } => {
            Banner::new("Pick a vowel ($250)", Tone::Neutral)
        }
        GameEvent::VowelBought { by: Side::Opponent } => {
            Banner::new("Computer buys a vowel", Tone::Neutral)
        }
        GameEvent::LetterCalled { by: Side::Opponent, letter } => {
            Banner::new(format!("Computer calls {}", letter), Tone::Neutral)
        }
        GameEvent::LetterCalled { .. } => return None,
        GameEvent::LetterResolved {
            by,
            letter,
            count,
            earned,
        } => {
            let mut text = match count {
                0 => format!("No {}", letter),
                1 => format!("There is one {}", letter),
                n => format!("There are {} {}s", n, letter),
            };
            if *by == Side::Opponent {
                text = format!("Computer: {}", text);
            }
            if *earned > 0 {
                text.push_str(&format!(" (+{})", format_money(*earned)));
                Banner::new(text, Tone::Money)
            } else if *count == 0 {
                Banner::new(text, Tone::Bad)
            } else {
                Banner::new(text, Tone::Neutral)
            }
        }
        GameEvent::SolveAttempt { by: Side::Opponent, .. } => {
            Banner::new("Computer solves the puzzle!", Tone::Bad)
        }
        GameEvent::SolveAttempt { correct: true, .. } => Banner::new("Solved!", Tone::Money),
        GameEvent::SolveAttempt { correct: false, .. } => {
            Banner::new("Sorry, that's not it", Tone::Bad)
        }
        GameEvent::TurnPassed { to: Side::Player } => Banner::new("Your turn", Tone::Neutral),
        GameEvent::TurnPassed { to: Side::Opponent } => {
            Banner::new("Computer's turn", Tone::Neutral)
        }
        GameEvent::SuddenDeathStarted { vowels } => {
            let list: Vec<String> = vowels.iter().map(char::to_string).collect();
            Banner::new(
                format!("Sudden death! Revealing {}", list.join(", ")),
                Tone::Bad,
            )
        }
        GameEvent::VowelRevealed { vowel, count } => Banner::new(
            format!("The house reveals {} x {}", count, vowel),
            Tone::Neutral,
        ),
        GameEvent::SolveWindowOpened { window } => Banner::new(
            format!("Solve it now! Press Enter ({}s)", window.as_secs()),
            Tone::Money,
        ),
        GameEvent::RoundEnded { outcome, earned } => {
            let (text, tone) = match outcome {
                RoundOutcome::Won(Side::Player) => (
                    format!("You win the round and bank {}", format_money(*earned)),
                    Tone::Money,
                ),
                RoundOutcome::Won(Side::Opponent) => (
                    format!("Computer wins the round and banks {}", format_money(*earned)),
                    Tone::Bad,
                ),
                RoundOutcome::Draw => ("Draw, nobody scores".to_string(), Tone::Neutral),
            };
            Banner::new(format!("{}. Press Enter to continue", text), tone)
        }
        GameEvent::GameOver { result } => {
            let (text, tone) = match result {
                GameResult::PlayerWins { margin } => (
                    format!("You win the game by {}!", format_money(*margin)),
                    Tone::Money,
                ),
                GameResult::OpponentWins { margin } => (
                    format!("Computer wins the game by {}", format_money(*margin)),
                    Tone::Bad,
                ),
                GameResult::Tie => ("It's a tie".to_string(), Tone::Neutral),
            };
            Banner::new(format!("{}. Press Enter to play again", text), tone)
        }
    };
    Some(banner)
}

/// Dollar amount with thousands separators.
pub fn format_money(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
