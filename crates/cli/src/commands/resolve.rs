//! Resolve free-text character references.

use anyhow::{Context, Result};
use clap::Parser;
use party_core::IdentityResolver;
use serde::Serialize;

use super::{RosterArgs, print_json};
use crate::config::CliConfig;

/// Resolve character references to canonical ids
#[derive(Parser, Debug)]
pub struct Resolve {
    #[command(flatten)]
    roster: RosterArgs,

    /// Names, ids or aliases to resolve
    #[arg(value_name = "TOKEN", required = true)]
    tokens: Vec<String>,
}

#[derive(Serialize)]
struct ResolveOutput {
    ids: Vec<String>,
    unknown: Vec<String>,
}

impl Resolve {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let cache = self.roster.open(config)?;
        let roster = cache.get().context("Failed to load roster")?;

        let resolution = IdentityResolver::new(&roster).resolve_detailed(self.tokens.as_slice());
        print_json(
            &ResolveOutput {
                ids: resolution.ids,
                unknown: resolution.unknown,
            },
            false,
        )
    }
}
