//! Development tasks for the zone generator
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Layout, ListSaves, NormalizeDeltas, Populate, ValidateContent};

/// Development tasks for the zone generator
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for zone generation", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print the generated terrain of a zone
    Layout(Layout),

    /// Generate a zone and report the placed content
    Populate(Populate),

    /// Repair legacy or damaged zone deltas in a save file
    NormalizeDeltas(NormalizeDeltas),

    /// Cross-check content definitions, spawn tables and layouts
    ValidateContent(ValidateContent),

    /// List save slots
    ListSaves(ListSaves),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ZONE_DATA_DIR and SAVE_DATA_DIR)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    utils::setup_logging(cli.verbose);

    match cli.command {
        Command::Layout(cmd) => cmd.execute(),
        Command::Populate(cmd) => cmd.execute(),
        Command::NormalizeDeltas(cmd) => cmd.execute(),
        Command::ValidateContent(cmd) => cmd.execute(),
        Command::ListSaves(cmd) => cmd.execute(),
    }
}
