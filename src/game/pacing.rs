//! Delay table for scheduled continuations
//!
//! Delays only pace the game for a human watching it. Collapsing them all to
//! zero (`PacingProfile::Instant`) must play out exactly the same game.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Named pacing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PacingProfile {
    #[default]
    Normal,
    /// Every delay halved
    Fast,
    /// No delays at all (tests, replays)
    Instant,
}

impl PacingProfile {
    pub fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Instant => "instant",
        }
    }
}

impl fmt::Display for PacingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown pacing name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pace {0:?} (expected normal, fast or instant)")]
pub struct ParsePaceError(pub String);

impl FromStr for PacingProfile {
    type Err = ParsePaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            "instant" => Ok(Self::Instant),
            _ => Err(ParsePaceError(s.to_string())),
        }
    }
}

/// Delays between engine steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    pub profile: PacingProfile,

    /// Spin request to landing
    pub wheel_spin: Duration,
    /// Turn hand-off to the opponent's first move
    pub opponent_handoff: Duration,
    /// Opponent deliberating over its opening move
    pub opponent_think: Duration,
    /// Opponent hit to its next move
    pub opponent_continue: Duration,
    /// Cash landing to the opponent's consonant choice
    pub consonant_choice: Duration,
    /// Opponent consonant announced to resolved
    pub letter_announce: Duration,
    /// Opponent vowel purchase announced to resolved
    pub vowel_announce: Duration,
    /// Settle time after a called letter
    pub reveal_settle: Duration,
    /// Extra settle time per revealed tile
    pub reveal_per_tile: Duration,
    /// Miss to turn hand-off
    pub miss_pause: Duration,
    /// Bankrupt / lose-turn to turn hand-off
    pub penalty_pause: Duration,
    pub wrong_solve_pause: Duration,
    /// Opponent announcing a solve to the round ending
    pub opponent_solve: Duration,
    /// Deadlock detected to sudden death starting
    pub deadlock_pause: Duration,

    pub sudden_death_first_reveal: Duration,
    pub sudden_death_reveal_interval: Duration,
    /// Last reveal to the solve window opening
    pub solve_window_delay: Duration,
    pub solve_window: Duration,
    pub sudden_death_opponent_think: Duration,
    pub sudden_death_verdict: Duration,
    pub draw_verdict: Duration,
}

impl Pacing {
    /// Full-length delays.
    pub fn normal() -> Self {
        let ms = Duration::from_millis;
        Self {
            profile: PacingProfile::Normal,
            wheel_spin: ms(3000),
            opponent_handoff: ms(1200),
            opponent_think: ms(1100),
            opponent_continue: ms(1300),
            consonant_choice: ms(2100),
            letter_announce: ms(700),
            vowel_announce: ms(900),
            reveal_settle: ms(250),
            reveal_per_tile: ms(90),
            miss_pause: ms(900),
            penalty_pause: ms(1500),
            wrong_solve_pause: ms(1000),
            opponent_solve: ms(1400),
            deadlock_pause: ms(800),
            sudden_death_first_reveal: ms(1500),
            sudden_death_reveal_interval: ms(2500),
            solve_window_delay: ms(500),
            solve_window: ms(5000),
            sudden_death_opponent_think: ms(2000),
            sudden_death_verdict: ms(1000),
            draw_verdict: ms(1200),
        }
    }

    /// Half-length delays.
    pub fn fast() -> Self {
        Self {
            profile: PacingProfile::Fast,
            ..Self::normal().map(|d| d / 2)
        }
    }

    /// No delays.
    pub fn instant() -> Self {
        Self {
            profile: PacingProfile::Instant,
            ..Self::normal().map(|_| Duration::ZERO)
        }
    }

    pub fn for_profile(profile: PacingProfile) -> Self {
        match profile {
            PacingProfile::Normal => Self::normal(),
            PacingProfile::Fast => Self::fast(),
            PacingProfile::Instant => Self::instant(),
        }
    }

    /// Settle delay after a letter that turned `count` tiles.
    pub fn settle(&self, count: usize) -> Duration {
        self.reveal_settle + self.reveal_per_tile * count as u32
    }

    /// Delay from sudden death starting to the `n`th vowel reveal (0-based).
    pub fn sudden_death_reveal(&self, n: usize) -> Duration {
        self.sudden_death_first_reveal + self.sudden_death_reveal_interval * n as u32
    }

    fn map(self, f: impl Fn(Duration) -> Duration) -> Self {
        Self {
            profile: self.profile,
            wheel_spin: f(self.wheel_spin),
            opponent_handoff: f(self.opponent_handoff),
            opponent_think: f(self.opponent_think),
            opponent_continue: f(self.opponent_continue),
            consonant_choice: f(self.consonant_choice),
            letter_announce: f(self.letter_announce),
            vowel_announce: f(self.vowel_announce),
            reveal_settle: f(self.reveal_settle),
            reveal_per_tile: f(self.reveal_per_tile),
            miss_pause: f(self.miss_pause),
            penalty_pause: f(self.penalty_pause),
            wrong_solve_pause: f(self.wrong_solve_pause),
            opponent_solve: f(self.opponent_solve),
            deadlock_pause: f(self.deadlock_pause),
            sudden_death_first_reveal: f(self.sudden_death_first_reveal),
            sudden_death_reveal_interval: f(self.sudden_death_reveal_interval),
            solve_window_delay: f(self.solve_window_delay),
            solve_window: f(self.solve_window),
            sudden_death_opponent_think: f(self.sudden_death_opponent_think),
            sudden_death_verdict: f(self.sudden_death_verdict),
            draw_verdict: f(self.draw_verdict),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::normal()
    }
}
