//! Recommend a party for a request payload.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use party_content::{RequestLoader, WeightsLoader};
use party_core::{PartySelector, ScoringWeights};

use super::{RosterArgs, print_json};
use crate::config::CliConfig;

/// Recommend a party
#[derive(Parser, Debug)]
pub struct Recommend {
    #[command(flatten)]
    roster: RosterArgs,

    /// Request payload JSON, or `-` for stdin
    #[arg(long, value_name = "FILE", default_value = "-")]
    request: PathBuf,

    /// Scoring weights TOML (defaults to PARTY_WEIGHTS_PATH, then built-in weights)
    #[arg(short, long, value_name = "FILE")]
    weights: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

impl Recommend {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let weights = match self.weights.as_ref().or(config.weights_path.as_ref()) {
            Some(path) => WeightsLoader::load(path)?,
            None => ScoringWeights::default(),
        };

        let raw = if self.request == Path::new("-") {
            RequestLoader::from_reader(std::io::stdin().lock())?
        } else {
            RequestLoader::load(&self.request)?
        };

        let cache = self.roster.open(config)?;
        let roster = cache.get().context("Failed to load roster")?;

        let result = PartySelector::new(weights).recommend_payload(raw, &roster);
        for issue in &result.issues {
            tracing::warn!(code = issue.code(), "{}", issue);
        }
        tracing::info!(
            ok = result.ok,
            members = result.party().len(),
            "recommendation finished"
        );

        print_json(&result, self.pretty)
    }
}
