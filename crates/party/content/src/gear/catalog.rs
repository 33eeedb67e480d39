//! Rune set catalog.
//!
//! Catalog exports come either as a list of set objects or as an object keyed
//! by set name. Field names vary between exporters, so each attribute is read
//! from the first key that carries a non-empty string.

use serde::Serialize;
use serde_json::{Map, Value};

use super::archetype::{Archetype, FALLBACK_PRIMARY, FALLBACK_SECONDARY};

const NAME_KEYS: [&str; 3] = ["name", "title", "setName"];
const ICON_KEYS: [&str; 8] = ["img", "image", "icon", "file", "filename", "jpg", "png", "src"];
const TWO_PIECE_KEYS: [&str; 7] = [
    "set2",
    "twoSet",
    "effect2",
    "bonus2",
    "twoPieces",
    "two_piece",
    "2set",
];
const FOUR_PIECE_KEYS: [&str; 7] = [
    "set4",
    "fourSet",
    "effect4",
    "bonus4",
    "fourPieces",
    "four_piece",
    "4set",
];

/// Display metadata of one rune set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuneSet {
    pub name: String,
    pub icon: Option<String>,
    pub effect2: Option<String>,
    pub effect4: Option<String>,
}

impl RuneSet {
    /// Reads a set object. `fallback_name` is used when the object names
    /// itself nowhere.
    pub fn from_object(object: &Map<String, Value>, fallback_name: Option<&str>) -> Option<Self> {
        let name = first_string(object, &NAME_KEYS)
            .or_else(|| fallback_name.map(str::trim).filter(|n| !n.is_empty()))?
            .to_string();

        let effect = |keys: &[&str], pieces: &str| {
            first_string(object, keys)
                .or_else(|| match object.get("effects") {
                    Some(Value::Object(effects)) => first_string(effects, &[pieces]),
                    _ => None,
                })
                .map(str::to_string)
        };

        Some(Self {
            icon: first_string(object, &ICON_KEYS).map(str::to_string),
            effect2: effect(&TWO_PIECE_KEYS, "2"),
            effect4: effect(&FOUR_PIECE_KEYS, "4"),
            name,
        })
    }
}

fn first_string<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| match object.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim()),
        _ => None,
    })
}

/// Ordered collection of rune sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuneCatalog {
    sets: Vec<RuneSet>,
}

impl RuneCatalog {
    /// Normalises a catalog export. Entries that are not objects or carry no
    /// name are skipped; a repeated name replaces the earlier entry in place.
    pub fn from_value(value: &Value) -> Self {
        let mut catalog = Self::default();
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(object) = item {
                        catalog.insert(RuneSet::from_object(object, None));
                    }
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries {
                    if let Value::Object(object) = item {
                        catalog.insert(RuneSet::from_object(object, Some(key.as_str())));
                    }
                }
            }
            _ => tracing::warn!("rune catalog is neither a list nor an object"),
        }
        catalog
    }

    fn insert(&mut self, set: Option<RuneSet>) {
        let Some(set) = set else {
            return;
        };
        match self.sets.iter_mut().find(|s| s.name == set.name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuneSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Picks the (4-piece, 2-piece) sets for an archetype.
    ///
    /// Unavailable preferences fall back to Alpha / Beth, then to catalog
    /// order. Without a usable second set both slots name the 4-piece set.
    pub fn choose_sets(&self, archetype: Archetype) -> (String, String) {
        let (mut primary, mut secondary): (&str, &str) = archetype.preferred_sets();
        let first = self.sets.first().map(|s| s.name.as_str());
        let second = self.sets.get(1).map(|s| s.name.as_str());

        if !self.contains(primary) {
            primary = if self.contains(FALLBACK_PRIMARY) {
                FALLBACK_PRIMARY
            } else {
                first.unwrap_or(primary)
            };
        }
        if !self.contains(secondary) || secondary == primary {
            secondary = if self.contains(FALLBACK_SECONDARY) && FALLBACK_SECONDARY != primary {
                FALLBACK_SECONDARY
            } else {
                second.unwrap_or(primary)
            };
        }

        (primary.to_string(), secondary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_and_map_forms_normalise_alike() {
        let list = RuneCatalog::from_value(&json!([
            {"name": "Alpha", "icon": "alpha.png", "set2": "ATK +10%", "set4": "Basic DMG +30%"},
            {"title": "Beth", "effects": {"2": "Crit +8%", "4": "Crit DMG +20%"}},
            "not a set",
            {"icon": "nameless.png"}
        ]));
        let map = RuneCatalog::from_value(&json!({
            "Alpha": {"img": "alpha.png", "twoSet": "ATK +10%", "fourSet": "Basic DMG +30%"},
            "Beth": {"effects": {"2": "Crit +8%", "4": "Crit DMG +20%"}}
        }));

        assert_eq!(list, map);
        assert_eq!(list.names().collect::<Vec<_>>(), ["Alpha", "Beth"]);

        let beth = list.get("Beth").expect("beth");
        assert_eq!(beth.icon, None);
        assert_eq!(beth.effect4.as_deref(), Some("Crit DMG +20%"));
    }

    #[test]
    fn test_choose_sets_prefers_archetype_sets() {
        let catalog = RuneCatalog::from_value(&json!([
            {"name": "Alpha"}, {"name": "Beth"}, {"name": "Daleth"}, {"name": "Zahn"}
        ]));
        assert_eq!(
            catalog.choose_sets(Archetype::Healer),
            ("Daleth".to_string(), "Zahn".to_string())
        );
        assert_eq!(
            catalog.choose_sets(Archetype::CritDps),
            ("Beth".to_string(), "Alpha".to_string())
        );
    }

    #[test]
    fn test_choose_sets_falls_back() {
        let catalog = RuneCatalog::from_value(&json!([{"name": "Alpha"}, {"name": "Beth"}]));
        assert_eq!(
            catalog.choose_sets(Archetype::Tank),
            ("Alpha".to_string(), "Beth".to_string())
        );

        let catalog = RuneCatalog::from_value(&json!([{"name": "Gimel"}, {"name": "Hert"}]));
        assert_eq!(
            catalog.choose_sets(Archetype::Healer),
            ("Gimel".to_string(), "Hert".to_string())
        );

        let empty = RuneCatalog::default();
        assert_eq!(
            empty.choose_sets(Archetype::Dot),
            ("Gimel".to_string(), "Gimel".to_string())
        );
    }
}
