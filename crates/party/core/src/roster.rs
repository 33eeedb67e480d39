//! Roster construction and canonical spelling folding.
//!
//! A [`Roster`] is an ordered, immutable snapshot of characters with unique
//! ids and unique case-insensitive display names. Two construction paths
//! exist:
//!
//! - [`Roster::from_characters`]: strict, rejects duplicates with
//!   [`RosterError`].
//! - [`RosterBuilder`]: lenient, used by catalog loaders. Folds known
//!   spelling variants into one canonical entry and merges later duplicates
//!   into the first occurrence.

use std::collections::HashMap;

use crate::character::Character;
use crate::error::RosterError;
use crate::slug::slug;

/// Ordered, immutable character roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Builds a roster, rejecting empty ids, duplicate ids (exact or
    /// differing only in case) and duplicate case-insensitive display names.
    pub fn from_characters(characters: Vec<Character>) -> Result<Self, RosterError> {
        let mut index = HashMap::with_capacity(characters.len());
        let mut folded: HashMap<String, usize> = HashMap::with_capacity(characters.len());
        let mut names: HashMap<String, usize> = HashMap::with_capacity(characters.len());

        for (i, character) in characters.iter().enumerate() {
            if character.id.trim().is_empty() {
                return Err(RosterError::EmptyId { index: i });
            }
            if index.insert(character.id.clone(), i).is_some() {
                return Err(RosterError::DuplicateId {
                    id: character.id.clone(),
                });
            }
            // Lookups are case-insensitive, so "Nina" and "nina" collide.
            let id_key = character.id.to_lowercase();
            if let Some(&first) = folded.get(&id_key) {
                return Err(RosterError::IdCaseCollision {
                    first: characters[first].id.clone(),
                    second: character.id.clone(),
                });
            }
            folded.insert(id_key, i);
            let name_key = name_key(&character.name);
            if name_key.is_empty() {
                continue;
            }
            if let Some(&first) = names.get(&name_key) {
                return Err(RosterError::DuplicateName {
                    name: character.name.clone(),
                    first: characters[first].id.clone(),
                    second: character.id.clone(),
                });
            }
            names.insert(name_key, i);
        }

        Ok(Self { characters, index })
    }

    pub fn builder() -> RosterBuilder {
        RosterBuilder::default()
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.index.get(id).map(|&i| &self.characters[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.characters.iter()
    }
}

/// A canonical character identity and the spellings that denote it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalSpelling {
    pub id: String,
    pub name: String,
    pub variants: Vec<String>,
}

/// Lookup of canonical spellings keyed by slug.
#[derive(Clone, Debug, Default)]
pub struct SpellingTable {
    groups: Vec<CanonicalSpelling>,
    by_slug: HashMap<String, usize>,
}

impl SpellingTable {
    pub fn new(groups: impl IntoIterator<Item = CanonicalSpelling>) -> Self {
        let mut table = Self::default();
        for group in groups {
            table.insert(group);
        }
        table
    }

    /// Adds a group. Slugs already claimed by an earlier group stay with it.
    pub fn insert(&mut self, group: CanonicalSpelling) {
        let at = self.groups.len();
        let keys = std::iter::once(group.id.as_str())
            .chain(std::iter::once(group.name.as_str()))
            .chain(group.variants.iter().map(String::as_str))
            .map(slug)
            .filter(|key| !key.is_empty())
            .collect::<Vec<_>>();
        for key in keys {
            self.by_slug.entry(key).or_insert(at);
        }
        self.groups.push(group);
    }

    /// Finds the group a free-text spelling belongs to.
    pub fn lookup(&self, text: &str) -> Option<&CanonicalSpelling> {
        self.by_slug.get(&slug(text)).map(|&i| &self.groups[i])
    }

    /// Rewrites a character onto its canonical identity, if it has one.
    ///
    /// The former name and every known variant are kept as aliases.
    pub fn fold(&self, mut character: Character) -> Character {
        let group = std::iter::once(character.id.as_str())
            .chain(std::iter::once(character.name.as_str()))
            .chain(character.aliases.iter().map(String::as_str))
            .find_map(|text| self.lookup(text))
            .cloned();

        let Some(group) = group else {
            return character;
        };

        if !character.name.eq_ignore_ascii_case(&group.name) {
            let former = std::mem::take(&mut character.name);
            character.add_alias(former);
        }
        character.id = group.id;
        character.name = group.name;
        for variant in group.variants {
            character.add_alias(variant);
        }
        character
    }

    pub fn groups(&self) -> &[CanonicalSpelling] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Lenient roster construction for catalog data.
///
/// Ids are normalised with [`slug`] (falling back to the slugged name),
/// spelling variants are folded, and for a duplicate id or display name the
/// first entry wins while the later entry's name and aliases are merged into it.
#[derive(Debug, Default)]
pub struct RosterBuilder {
    spellings: SpellingTable,
    characters: Vec<Character>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    merged: usize,
}

impl RosterBuilder {
    #[must_use]
    pub fn spellings(mut self, spellings: SpellingTable) -> Self {
        self.spellings = spellings;
        self
    }

    /// Adds a character. Returns `false` if it was skipped or merged.
    pub fn push(&mut self, mut character: Character) -> bool {
        let id = match slug(&character.id) {
            id if !id.is_empty() => id,
            _ => slug(&character.name),
        };
        if id.is_empty() {
            tracing::warn!(name = %character.name, "skipping character without usable id");
            return false;
        }
        character.id = id;
        character.name = character.name.trim().to_string();

        let character = self.spellings.fold(character);
        let name_key = name_key(&character.name);

        let existing = self
            .by_id
            .get(&character.id)
            .or_else(|| self.by_name.get(&name_key))
            .copied();

        if let Some(at) = existing {
            tracing::warn!(
                id = %character.id,
                kept = %self.characters[at].id,
                "duplicate roster entry merged into first occurrence"
            );
            let kept = &mut self.characters[at];
            if !kept.name.eq_ignore_ascii_case(&character.name) {
                kept.add_alias(character.name);
            }
            for alias in character.aliases {
                kept.add_alias(alias);
            }
            self.merged += 1;
            return false;
        }

        let at = self.characters.len();
        self.by_id.insert(character.id.clone(), at);
        if !name_key.is_empty() {
            self.by_name.insert(name_key, at);
        }
        self.characters.push(character);
        true
    }

    #[must_use]
    pub fn with(mut self, character: Character) -> Self {
        self.push(character);
        self
    }

    pub fn extend(&mut self, characters: impl IntoIterator<Item = Character>) {
        for character in characters {
            self.push(character);
        }
    }

    pub fn build(self) -> Roster {
        tracing::debug!(
            characters = self.characters.len(),
            merged = self.merged,
            "roster built"
        );
        let index = self
            .characters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Roster {
            characters: self.characters,
            index,
        }
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
