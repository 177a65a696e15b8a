//! War CLI - Command-line interface for playing territorial conquest.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// War - A deterministic territorial-conquest game
#[derive(Parser, Debug)]
#[command(name = "war")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v: info, -vv: debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Register territories and play interactively
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Your army color (default: asked)
        #[arg(short, long)]
        color: Option<String>,

        /// Load territories from a JSON roster instead of asking
        #[arg(short, long)]
        roster: Option<std::path::PathBuf>,

        /// Game mode: free or mission
        #[arg(short, long, default_value = "mission")]
        mode: cli::ModeArg,

        /// Play a specific mission (1-6 or its key) instead of a random one
        #[arg(long)]
        mission: Option<war::MissionKind>,

        /// Summary format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// List the mission catalog
    Missions {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Validate and show a roster file without playing
    Roster {
        /// Roster file (.json)
        #[arg(required = true)]
        file: std::path::PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "war=warn",
        1 => "war=info",
        _ => "war=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Play {
            seed,
            color,
            roster,
            mode,
            mission,
            format,
        } => cli::play::execute(&cli::play::PlayOptions {
            seed,
            color,
            roster,
            mode,
            mission,
            format,
        }),

        Commands::Missions { format } => cli::missions::execute(format),

        Commands::Roster { file, format } => cli::roster::execute(&file, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
