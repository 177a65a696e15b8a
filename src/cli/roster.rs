//! Roster command implementation: register a map without playing.

use std::io::{self, Write};
use std::path::Path;

use war::game::check_invariants;
use war::roster::load_roster;

use super::output::format_map;
use super::{CliError, OutputFormat};

/// Execute the roster command.
///
/// # Errors
///
/// Returns an error if the roster cannot be loaded or printed.
pub(crate) fn execute(path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let registry = load_roster(path)?;
    let violations = check_invariants(&registry);

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            write!(stdout, "{}", format_map(&registry))?;
            writeln!(stdout, "{} territories registered.", registry.len())?;
            for violation in &violations {
                writeln!(stdout, "  {violation}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(registry.territories())?;
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
