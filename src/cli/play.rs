//! Play command implementation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::warn;
use war::game::{MAX_COLOR_LEN, bounded, check_invariants};
use war::roster::load_roster;
use war::{GameMode, MissionKind, Registry, Session, SessionConfig, WarError};

use super::console::Console;
use super::output::{JsonSummary, format_map, format_mission, format_summary, heading};
use super::{CliError, ModeArg, OutputFormat};

/// Options for the play command.
#[derive(Debug, Clone)]
pub(crate) struct PlayOptions {
    /// Dice seed (default: from the clock).
    pub(crate) seed: Option<u64>,
    /// Player color (default: asked).
    pub(crate) color: Option<String>,
    /// Roster file (default: territories are asked).
    pub(crate) roster: Option<PathBuf>,
    /// Free or mission play.
    pub(crate) mode: ModeArg,
    /// Bind this mission instead of drawing one.
    pub(crate) mission: Option<MissionKind>,
    /// Final summary format.
    pub(crate) format: OutputFormat,
}

/// Execute the play command on the process console.
///
/// In JSON mode the conversation goes to stderr so stdout carries only the
/// summary.
///
/// # Errors
///
/// Returns an error on fatal engine errors or console failure.
pub(crate) fn execute(options: &PlayOptions) -> Result<(), CliError> {
    let stdin = io::stdin().lock();
    match options.format {
        OutputFormat::Text => play(options, stdin, io::stdout().lock()),
        OutputFormat::Json => play(options, stdin, io::stderr().lock()),
    }
}

/// Run a full session: color, map, mission, battles, summary.
fn play<R: BufRead, W: Write>(options: &PlayOptions, input: R, output: W) -> Result<(), CliError> {
    let mut console = Console::new(input, output);

    console.say(&heading("WAR - TERRITORIAL CONQUEST"))?;
    console.say("Register territories, roll the dice and fulfill your secret mission.\n")?;

    let color = match &options.color {
        Some(color) => bounded(color, MAX_COLOR_LEN),
        None => console.ask_color()?,
    };
    if color.is_empty() {
        return Err(WarError::BlankPlayer.into());
    }

    let registry = match &options.roster {
        Some(path) => load_roster(path)?,
        None => {
            let count = console.ask_count()?;
            let mut registry = Registry::with_requested(count)?;
            console.register(&mut registry)?;
            registry
        }
    };
    for violation in check_invariants(&registry) {
        warn!(%violation, "registered map is inconsistent");
    }

    let config = SessionConfig {
        seed: options.seed,
        mode: GameMode::from(options.mode),
        forced_mission: options.mission,
    };
    let mut session = Session::new(registry, &color, &config)?;

    if let Some(mission) = session.mission() {
        console.say(&format_mission(mission))?;
    }
    console.say(&format_map(session.registry()))?;

    let report = if console.ask_yes("\nStart battle mode? (y/n): ")? {
        console.say(&heading("BATTLE MODE"))?;
        let report = session.run(&mut console)?;
        console.say("\nBattle mode ended.\n")?;
        console.say(&heading("FINAL STATE"))?;
        console.say(&format_map(session.registry()))?;
        report
    } else {
        session.declined()
    };

    match options.format {
        OutputFormat::Text => console.say(&format!("\n{}", format_summary(&session, &report)))?,
        OutputFormat::Json => {
            let summary = JsonSummary::new(&session, &report);
            let json = serde_json::to_string_pretty(&summary)?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
