//! Missions command implementation.

use std::io::{self, Write};

use serde::Serialize;
use war::MissionKind;

use super::output::format_catalog;
use super::{CliError, OutputFormat};

/// JSON-serializable catalog entry.
#[derive(Debug, Serialize)]
struct JsonMission {
    /// 1-based catalog number.
    number: usize,
    /// Stable key accepted by `--mission`.
    key: &'static str,
    /// Text shown to the player.
    description: &'static str,
}

/// Execute the missions command.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write!(stdout, "{}", format_catalog())?,
        OutputFormat::Json => {
            let catalog: Vec<JsonMission> = MissionKind::ALL
                .into_iter()
                .map(|kind| JsonMission {
                    number: kind.number(),
                    key: kind.key(),
                    description: kind.description(),
                })
                .collect();
            writeln!(stdout, "{}", serde_json::to_string_pretty(&catalog)?)?;
        }
    }
    Ok(())
}
