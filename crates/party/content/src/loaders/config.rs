//! Scoring weights loader.

use std::path::Path;

use party_core::ScoringWeights;

use crate::loaders::{LoadResult, read_file};

/// Loader for scoring weights from TOML files.
pub struct WeightsLoader;

impl WeightsLoader {
    /// Load weights from a TOML file.
    ///
    /// Keys absent from the file keep their default values, so a file may
    /// override a single weight.
    pub fn load(path: &Path) -> LoadResult<ScoringWeights> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScoringWeights> {
        let weights: ScoringWeights = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weights TOML: {}", e))?;

        if weights.party_size == 0 {
            anyhow::bail!("party_size must be at least 1");
        }

        Ok(weights)
    }
}
