//! Free-text character references to canonical ids.
//!
//! Three lookup tables are built from the roster, all keyed by lowercase
//! text: id → id, name → id and alias → id. A token is trimmed, lowercased and
//! looked up in that priority order. Tokens matching nothing fall back to
//! their slug, an unresolved placeholder that may not exist in the roster.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::roster::Roster;
use crate::slug::slug;

/// Outcome of resolving a token list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved ids, deduplicated in first-occurrence order. May contain
    /// placeholders that are not in the roster.
    pub ids: Vec<String>,
    /// Raw tokens (trimmed) whose resolved id is not in the roster.
    pub unknown: Vec<String>,
}

/// Lookup tables over a roster snapshot.
#[derive(Debug)]
pub struct IdentityResolver<'a> {
    roster: &'a Roster,
    by_id: HashMap<String, &'a str>,
    by_name: HashMap<String, &'a str>,
    by_alias: HashMap<String, &'a str>,
}

impl<'a> IdentityResolver<'a> {
    /// Builds the lookup tables.
    ///
    /// Alias collisions across characters resolve to the later character in
    /// roster order. Ids are unique case-insensitively in a well-formed
    /// roster; if two still collide the first one keeps the id slot.
    pub fn new(roster: &'a Roster) -> Self {
        let mut by_id = HashMap::with_capacity(roster.len());
        let mut by_name = HashMap::with_capacity(roster.len());
        let mut by_alias = HashMap::new();

        for character in roster {
            let id = character.id.as_str();
            match by_id.entry(id.to_lowercase()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        kept = *slot.get(),
                        skipped = id,
                        "case-insensitive id collision, keeping first character"
                    );
                }
            }

            let name = character.name.trim().to_lowercase();
            if !name.is_empty() {
                by_name.insert(name, id);
            }

            for alias in &character.aliases {
                let alias = alias.trim().to_lowercase();
                if alias.is_empty() {
                    continue;
                }
                if let Some(previous) = by_alias.insert(alias, id) {
                    if previous != id {
                        tracing::debug!(previous, id, "alias reassigned to later character");
                    }
                }
            }
        }

        tracing::debug!(
            ids = by_id.len(),
            names = by_name.len(),
            aliases = by_alias.len(),
            "identity tables built"
        );

        Self {
            roster,
            by_id,
            by_name,
            by_alias,
        }
    }

    /// Resolves one token. Returns `None` for empty or whitespace-only input.
    pub fn resolve_token(&self, token: &str) -> Option<String> {
        let key = token.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        let hit = self
            .by_id
            .get(&key)
            .or_else(|| self.by_name.get(&key))
            .or_else(|| self.by_alias.get(&key));

        match hit {
            Some(id) => Some((*id).to_string()),
            None => {
                let placeholder = slug(token);
                (!placeholder.is_empty()).then_some(placeholder)
            }
        }
    }

    /// Resolves tokens to ids, deduplicated in first-occurrence order.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.resolve_detailed(tokens).ids
    }

    /// Resolves tokens and reports which ones do not name a roster character.
    pub fn resolve_detailed<S: AsRef<str>>(&self, tokens: &[S]) -> Resolution {
        let mut seen = HashSet::new();
        let mut resolution = Resolution::default();

        for token in tokens {
            let token = token.as_ref();
            let Some(id) = self.resolve_token(token) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }
            if !self.roster.contains(&id) {
                resolution.unknown.push(token.trim().to_string());
            }
            resolution.ids.push(id);
        }

        resolution
    }

    pub fn roster(&self) -> &'a Roster {
        self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;

    fn roster() -> Roster {
        Roster::from_characters(vec![
            Character::new("nina", "Nina").with_alias("Nina-chan"),
            Character::new("mio", "Mio Kurosaki").with_alias("Kuro"),
            Character::new("kuro", "Kuro Hime"),
        ])
        .expect("valid roster")
    }

    #[test]
    fn test_resolves_case_insensitively_and_dedups() {
        let roster = roster();
        let resolver = IdentityResolver::new(&roster);

        let before_dedup: Vec<_> = ["NINA", "nina-chan", "unknownx"]
            .iter()
            .filter_map(|t| resolver.resolve_token(t))
            .collect();
        assert_eq!(before_dedup, ["nina", "nina", "unknownx"]);

        let ids = resolver.resolve(&["NINA", "nina-chan", "unknownx"]);
        assert_eq!(ids, ["nina", "unknownx"]);
    }

    #[test]
    fn test_id_table_beats_alias_table() {
        let roster = roster();
        let resolver = IdentityResolver::new(&roster);
        // "kuro" is both an id and Mio's alias; the id table is consulted first.
        assert_eq!(resolver.resolve_token("Kuro").as_deref(), Some("kuro"));
        assert_eq!(resolver.resolve_token("mio kurosaki").as_deref(), Some("mio"));
    }

    #[test]
    fn test_blank_tokens_are_dropped() {
        let roster = roster();
        let resolver = IdentityResolver::new(&roster);
        assert!(resolver.resolve(&["", "   ", "\t"]).is_empty());
    }

    #[test]
    fn test_unknown_tokens_become_slugged_placeholders() {
        let roster = roster();
        let resolver = IdentityResolver::new(&roster);
        let resolution = resolver.resolve_detailed(&["Lady Red", "nina", "LADY RED"]);
        assert_eq!(resolution.ids, ["ladyred", "nina"]);
        assert_eq!(resolution.unknown, ["Lady Red"]);
    }

    #[test]
    fn test_later_alias_wins_collision() {
        let roster = Roster::from_characters(vec![
            Character::new("a", "Alpha").with_alias("Ace"),
            Character::new("b", "Bravo").with_alias("ace"),
        ])
        .expect("valid roster");
        let resolver = IdentityResolver::new(&roster);
        assert_eq!(resolver.resolve_token("ACE").as_deref(), Some("b"));
    }
}
