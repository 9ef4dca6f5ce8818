//! Command-line configuration
//!
//! Parsed with clap, then checked into a `GameConfig` the rest of the
//! program trusts.

use crate::game::{Difficulty, GameSettings, PacingProfile};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

/// Most rounds a single game may have.
pub const MAX_ROUNDS: u32 = 10;

#[derive(Debug, Parser)]
#[command(name = "spinword")]
#[command(about = "Spin the wheel, call letters, solve the puzzle before the computer does")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, env = "SPINWORD_ROUNDS", default_value_t = 3)]
    #[arg(help = "Rounds per game (1-10)")]
    pub rounds: u32,

    #[arg(short, long, env = "SPINWORD_DIFFICULTY", default_value = "medium")]
    #[arg(help = "Opponent difficulty: easy, medium or hard")]
    pub difficulty: String,

    #[arg(long, env = "SPINWORD_SEED")]
    #[arg(help = "RNG seed for reproducible games")]
    pub seed: Option<u64>,

    #[arg(long, default_value = "normal")]
    #[arg(help = "Animation pace: normal, fast or instant")]
    pub pace: String,

    #[arg(long, value_name = "PATH")]
    #[arg(help = "Write the log here instead of the data directory")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    #[arg(help = "More logging (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
}

/// Invalid command-line values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rounds must be between 1 and {MAX_ROUNDS}, got {0}")]
    Rounds(u32),

    #[error(transparent)]
    Difficulty(#[from] crate::game::difficulty::ParseDifficultyError),

    #[error(transparent)]
    Pace(#[from] crate::game::pacing::ParsePaceError),
}

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub settings: GameSettings,
    pub pace: PacingProfile,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub verbosity: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            pace: PacingProfile::default(),
            seed: None,
            log_file: None,
            verbosity: 0,
        }
    }
}

impl TryFrom<Cli> for GameConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if !(1..=MAX_ROUNDS).contains(&cli.rounds) {
            return Err(ConfigError::Rounds(cli.rounds));
        }
        let difficulty: Difficulty = cli.difficulty.parse()?;
        let pace: PacingProfile = cli.pace.parse()?;

        Ok(Self {
            settings: GameSettings {
                max_rounds: cli.rounds,
                difficulty,
            },
            pace,
            seed: cli.seed,
            log_file: cli.log_file,
            verbosity: cli.verbose,
        })
    }
}
