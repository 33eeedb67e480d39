//! Batch gear reports over a directory of character documents.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::RuneCatalog;
use super::recommend::GearRecommender;
use super::text::pick_first;
use crate::loaders::{LoadResult, read_file};

/// Keys checked for a character's report key, before the file stem.
const KEY_FIELDS: [&str; 5] = ["id", "slug", "key", "code", "nameId"];

/// Inputs a report was generated from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedFrom {
    pub characters_dir: String,
    pub runes_export: String,
    pub overrides: Option<String>,
}

/// Gear recommendations for every character, keyed by character key in
/// document order.
///
/// Items are kept as JSON so hand-written overrides can patch any field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GearReport {
    pub generated_from: GeneratedFrom,
    pub items: Map<String, Value>,
}

impl GearReport {
    /// Runs the recommender over `(key, document)` pairs. A later document
    /// with the same key replaces the earlier one in its original position.
    pub fn build(
        recommender: &GearRecommender,
        characters: &[(String, Value)],
        generated_from: GeneratedFrom,
    ) -> LoadResult<Self> {
        let mut items = Map::new();
        for (key, document) in characters {
            let recommendation = recommender.recommend(key, document);
            let value = serde_json::to_value(&recommendation)
                .map_err(|e| anyhow::anyhow!("Failed to encode gear for '{}': {}", key, e))?;
            items.insert(key.clone(), value);
        }

        Ok(Self {
            generated_from,
            items,
        })
    }

    /// Deep-merges per-character patches. Patches for unknown keys are
    /// ignored.
    pub fn apply_overrides(&mut self, overrides: Map<String, Value>) {
        for (key, patch) in overrides {
            let Some(item) = self.items.get_mut(&key) else {
                tracing::debug!(key = %key, "override for unknown character ignored");
                continue;
            };
            let base = std::mem::take(item);
            *item = deep_merge(base, patch);
        }
    }
}

/// Merges `patch` into `base`: objects merge recursively, a null patch keeps
/// the base, anything else replaces it.
pub fn deep_merge(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (base, Value::Null) => base,
        (Value::Object(mut base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let current = std::mem::take(slot);
                        *slot = deep_merge(current, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (_, patch) => patch,
    }
}

/// Loader for gear inputs.
pub struct GearLoader;

impl GearLoader {
    /// Load a rune set catalog export (list or keyed object).
    pub fn load_catalog(path: &Path) -> LoadResult<RuneCatalog> {
        let value = read_json(path)?;
        let catalog = RuneCatalog::from_value(&value);
        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "rune catalog has no usable sets");
        }
        Ok(catalog)
    }

    /// Load every `*.json` document in a directory, sorted by file name.
    ///
    /// Each document is keyed by its first non-empty id-like field, or by its
    /// file stem.
    pub fn load_characters(dir: &Path) -> LoadResult<Vec<(String, Value)>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut characters = Vec::with_capacity(paths.len());
        for path in paths {
            let document = read_json(&path)?;
            let key = pick_first(&document, &KEY_FIELDS).unwrap_or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            characters.push((key, document));
        }

        tracing::info!(dir = %dir.display(), characters = characters.len(), "character documents loaded");
        Ok(characters)
    }

    /// Load the `overrides` object of an overrides file.
    ///
    /// A file without an `overrides` object yields no overrides.
    pub fn load_overrides(path: &Path) -> LoadResult<Map<String, Value>> {
        match read_json(path)? {
            Value::Object(mut root) => match root.remove("overrides") {
                Some(Value::Object(overrides)) => Ok(overrides),
                _ => Ok(Map::new()),
            },
            _ => Ok(Map::new()),
        }
    }
}

fn read_json(path: &Path) -> LoadResult<Value> {
    let content = read_file(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse JSON {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_rules() {
        let base = json!({
            "archetype": "dps",
            "builds": [{"id": "default"}],
            "scaling": {"dominant": "atk", "weights": {"atk": 120.0}}
        });
        let patch = json!({
            "archetype": "crit_dps",
            "builds": [],
            "scaling": {"weights": {"hp": 10.0}},
            "note": null,
            "extra": {"pinned": true}
        });

        let merged = deep_merge(base, patch);
        assert_eq!(
            merged,
            json!({
                "archetype": "crit_dps",
                "builds": [],
                "scaling": {"dominant": "atk", "weights": {"atk": 120.0, "hp": 10.0}},
                "note": null,
                "extra": {"pinned": true}
            })
        );
    }

    #[test]
    fn test_deep_merge_null_patch_keeps_base() {
        assert_eq!(deep_merge(json!({"a": 1}), Value::Null), json!({"a": 1}));
        assert_eq!(deep_merge(json!([1, 2]), json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_load_characters_keys_and_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.json"), r#"{"name": "Bravo"}"#).expect("write");
        std::fs::write(dir.path().join("a.json"), r#"{"id": "alpha-1", "name": "Alpha"}"#)
            .expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let characters = GearLoader::load_characters(dir.path()).expect("load");
        let keys: Vec<_> = characters.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["alpha-1", "b"]);
    }

    #[test]
    fn test_report_keeps_document_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("01.json"), r#"{"id": "zeta", "name": "Zeta"}"#)
            .expect("write");
        std::fs::write(dir.path().join("02.json"), r#"{"id": "alpha", "name": "Alpha"}"#)
            .expect("write");

        let characters = GearLoader::load_characters(dir.path()).expect("load");
        let recommender = GearRecommender::new(RuneCatalog::default()).expect("patterns compile");
        let report = GearReport::build(&recommender, &characters, GeneratedFrom::default())
            .expect("report");

        let keys: Vec<_> = report.items.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);

        let json = serde_json::to_string(&report).expect("serializable");
        let zeta = json.find(r#""zeta":"#).expect("zeta present");
        let alpha = json.find(r#""alpha":"#).expect("alpha present");
        assert!(zeta < alpha);
    }

    #[test]
    fn test_load_overrides_tolerates_missing_section() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("overrides.json");

        std::fs::write(&path, r#"{"overrides": {"nina": {"archetype": "dot"}}}"#).expect("write");
        let overrides = GearLoader::load_overrides(&path).expect("load");
        assert_eq!(overrides["nina"], json!({"archetype": "dot"}));

        std::fs::write(&path, r#"{"overrides": []}"#).expect("write");
        assert!(GearLoader::load_overrides(&path).expect("load").is_empty());
    }
}
