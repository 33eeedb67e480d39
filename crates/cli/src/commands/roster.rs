//! Print the normalised roster.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use party_core::Character;
use serde::Serialize;

use super::{RosterArgs, print_json};
use crate::config::CliConfig;

/// Print the normalised roster
#[derive(Parser, Debug)]
pub struct RosterCmd {
    #[command(flatten)]
    roster: RosterArgs,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

/// `loaded_at` is when this process read the catalog, not the catalog's own
/// refresh stamp.
#[derive(Serialize)]
struct RosterOutput<'a> {
    loaded_at: Option<DateTime<Utc>>,
    count: usize,
    characters: &'a [Character],
}

impl RosterCmd {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let cache = self.roster.open(config)?;
        let roster = cache.get().context("Failed to load roster")?;

        print_json(
            &RosterOutput {
                loaded_at: cache.last_updated(),
                count: roster.len(),
                characters: roster.characters(),
            },
            self.pretty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_reports_load_time_as_loaded_at() {
        let characters = [Character::new("nina", "Nina")];
        let loaded_at = DateTime::parse_from_rfc3339("2025-03-01T03:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);

        let json = serde_json::to_value(RosterOutput {
            loaded_at: Some(loaded_at),
            count: characters.len(),
            characters: &characters,
        })
        .expect("serializable");

        assert_eq!(json["loaded_at"], "2025-03-01T03:00:00Z");
        assert_eq!(json["count"], 1);
        assert!(json.get("last_refresh").is_none());
    }
}
