//! Party recommendation command-line tool.
//!
//! Run with: `party <command>`

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Gear, Recommend, Resolve, RosterCmd};
use config::CliConfig;

/// Party recommendations over a gacha character roster
#[derive(Parser)]
#[command(name = "party")]
#[command(about = "Party recommendation tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Recommend a party for a request payload
    Recommend(Recommend),

    /// Resolve free-text character references to canonical ids
    Resolve(Resolve),

    /// Print the normalised roster
    Roster(RosterCmd),

    /// Derive rune builds from character documents
    Gear(Gear),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::init(config.log_dir.as_deref())?;

    let cli = Cli::parse();

    match cli.command {
        Command::Recommend(cmd) => cmd.execute(&config),
        Command::Resolve(cmd) => cmd.execute(&config),
        Command::Roster(cmd) => cmd.execute(&config),
        Command::Gear(cmd) => cmd.execute(),
    }
}
