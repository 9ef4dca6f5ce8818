//! File logging
//!
//! The terminal UI owns the screen, so log records go to a file:
//! - `--log-file` when given
//! - otherwise `spinword.log` in the OS-standard local data directory
//!   (via `directories`), e.g. `~/.local/share/spinword/` on Linux
//!
//! `RUST_LOG` overrides the level picked from `-v`.

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_FILE_NAME: &str = "spinword.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not determine a data directory for the log file")]
    NoDataDirectory,

    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger already installed")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Level for the number of `-v` flags.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Where the log goes when no path was given.
pub fn default_log_path() -> Result<PathBuf, LoggingError> {
    ProjectDirs::from("", "", "spinword")
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
        .ok_or(LoggingError::NoDataDirectory)
}

fn open_log(path: &Path) -> Result<fs::File, LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

/// Install the global logger. Returns the file being written.
pub fn init(log_file: Option<&Path>, verbosity: u8) -> Result<PathBuf, LoggingError> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    let file = open_log(&path)?;

    let default_level = level_for(verbosity).to_string().to_lowercase();
    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("logging to {}", path.display());
    Ok(path)
}
