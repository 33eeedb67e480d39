//! Command implementations.
//!
//! Each command is a separate module that implements its own CLI args and
//! execution logic.

mod gear;
mod recommend;
mod resolve;
mod roster;

pub use gear::Gear;
pub use recommend::Recommend;
pub use resolve::Resolve;
pub use roster::RosterCmd;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use party_content::{FileRosterSource, RosterCache};
use serde::Serialize;

use crate::config::CliConfig;

/// Roster selection shared by commands that need one.
#[derive(Args, Debug)]
pub struct RosterArgs {
    /// Roster catalog JSON (defaults to PARTY_ROSTER_PATH)
    #[arg(short, long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Spelling table RON replacing the built-in one
    #[arg(long, value_name = "FILE")]
    spellings: Option<PathBuf>,
}

impl RosterArgs {
    pub fn open(&self, config: &CliConfig) -> Result<RosterCache<FileRosterSource>> {
        let path = self
            .roster
            .clone()
            .or_else(|| config.roster_path.clone())
            .context("No roster given: pass --roster or set PARTY_ROSTER_PATH")?;

        let mut source = FileRosterSource::new(path);
        if let Some(spellings) = self.spellings.clone().or_else(|| config.spellings_path.clone()) {
            source = source.with_spellings(spellings);
        }

        let cache = RosterCache::new(source);
        Ok(match config.roster_max_age {
            Some(max_age) => cache.with_max_age(max_age),
            None => cache,
        })
    }
}

/// Writes `value` as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
