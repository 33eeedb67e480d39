//! Derive rune builds from character documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use party_content::gear::{GearLoader, GearRecommender, GearReport, GeneratedFrom};

use super::print_json;

/// Derive rune builds
#[derive(Parser, Debug)]
pub struct Gear {
    /// Directory of character JSON documents
    #[arg(long, value_name = "DIR")]
    characters: PathBuf,

    /// Rune set catalog export JSON
    #[arg(long, value_name = "FILE")]
    runes: PathBuf,

    /// Overrides JSON deep-merged into the generated items
    #[arg(long, value_name = "FILE")]
    overrides: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

impl Gear {
    pub fn execute(self) -> Result<()> {
        let catalog = GearLoader::load_catalog(&self.runes)?;
        let recommender = GearRecommender::new(catalog).context("Failed to compile text patterns")?;
        let characters = GearLoader::load_characters(&self.characters)?;

        let generated_from = GeneratedFrom {
            characters_dir: self.characters.display().to_string(),
            runes_export: self.runes.display().to_string(),
            overrides: self.overrides.as_ref().map(|p| p.display().to_string()),
        };
        let mut report = GearReport::build(&recommender, &characters, generated_from)?;

        if let Some(path) = &self.overrides {
            report.apply_overrides(GearLoader::load_overrides(path)?);
        }

        match &self.out {
            Some(path) => {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(
                    "wrote {} (characters={})",
                    path.display(),
                    report.items.len()
                );
                Ok(())
            }
            None => print_json(&report, true),
        }
    }
}
