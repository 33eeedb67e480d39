//! Roster catalog loader.
//!
//! Catalogs are JSON, either a bare list of records or a refresh snapshot:
//!
//! ```json
//! { "last_refresh": "2025-01-01T00:00:00+09:00", "count": 2, "characters": [ ... ] }
//! ```
//!
//! Records are loosely typed. Attribute tags are parsed leniently and the
//! role falls back to the character class.

use std::path::Path;

use party_core::{Character, Element, Rarity, Role, Roster, SpellingTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, SpellingLoader, read_file};

/// A character record as found in catalog files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub element: Option<String>,
    pub class: Option<String>,
    pub role: Option<String>,
    pub rarity: Option<String>,
    pub aliases: Vec<String>,
}

impl RosterRecord {
    /// Converts the record into a character. Records without a name are
    /// dropped.
    pub fn into_character(self) -> Option<Character> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            tracing::warn!(id = ?self.id, "skipping roster record without a name");
            return None;
        }

        let role = Role::resolve(
            self.role.as_deref().unwrap_or_default(),
            self.class.as_deref().unwrap_or_default(),
        );
        let rarity = Rarity::from_tag(self.rarity.as_deref().unwrap_or_default());
        let element = Element::from_tag(self.element.as_deref().unwrap_or_default());

        let mut character = Character::new(self.id.unwrap_or_default(), name)
            .with_rarity(rarity)
            .with_element(element)
            .with_role(role);
        for alias in self.aliases {
            character = character.with_alias(alias);
        }
        Some(character)
    }
}

/// On-disk roster layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterFile {
    List(Vec<RosterRecord>),
    Snapshot {
        #[serde(default)]
        last_refresh: Option<String>,
        #[serde(default)]
        count: Option<usize>,
        characters: Vec<RosterRecord>,
    },
}

impl RosterFile {
    pub fn into_records(self) -> Vec<RosterRecord> {
        match self {
            RosterFile::Snapshot { characters, .. } => characters,
            RosterFile::List(records) => records,
        }
    }
}

/// Loader for roster catalogs from JSON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster with the built-in spelling table.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        Self::load_with(path, SpellingLoader::builtin()?)
    }

    /// Load a roster, folding names with the given spelling table.
    pub fn load_with(path: &Path, spellings: SpellingTable) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Self::parse(&content, spellings)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            characters = roster.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    pub fn parse(content: &str, spellings: SpellingTable) -> LoadResult<Roster> {
        let file: RosterFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster JSON: {}", e))?;

        if let RosterFile::Snapshot {
            count: Some(count),
            characters,
            ..
        } = &file
        {
            if *count != characters.len() {
                tracing::warn!(
                    declared = count,
                    found = characters.len(),
                    "roster snapshot count mismatch"
                );
            }
        }

        let mut builder = Roster::builder().spellings(spellings);
        builder.extend(
            file.into_records()
                .into_iter()
                .filter_map(RosterRecord::into_character),
        );
        Ok(builder.build())
    }
}
