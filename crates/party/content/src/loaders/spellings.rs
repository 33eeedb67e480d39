//! Canonical spelling loader.

use std::path::Path;

use party_core::{CanonicalSpelling, SpellingTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for canonical spelling tables from RON files.
pub struct SpellingLoader;

impl SpellingLoader {
    /// Loads the spelling table shipped with the crate.
    pub fn builtin() -> LoadResult<SpellingTable> {
        let content = include_str!("../../data/spellings.ron");
        Self::parse(content).map_err(|e| anyhow::anyhow!("Failed to parse spellings.ron: {}", e))
    }

    /// Load a spelling table from a RON file.
    ///
    /// RON format: `Vec<CanonicalSpelling>`
    pub fn load(path: &Path) -> LoadResult<SpellingTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellingTable> {
        let groups: Vec<CanonicalSpelling> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spelling RON: {}", e))?;
        Ok(SpellingTable::new(groups))
    }
}
