//! CLI command implementations for War.

pub(crate) mod missions;
pub(crate) mod play;
pub(crate) mod roster;

mod console;
mod output;

use clap::ValueEnum;
use thiserror::Error;
use war::GameMode;

/// Output format for commands that print a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// How `play` is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Battles without a mission.
    Free,
    /// Battles until the secret mission is fulfilled.
    Mission,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Free => Self::Free,
            ModeArg::Mission => Self::Mission,
        }
    }
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The engine refused the input.
    #[error(transparent)]
    War(#[from] war::WarError),

    /// Console input or output failed.
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
