//! Skill text extraction and stat scaling.
//!
//! Character documents come from several scrapers and share no schema, so
//! text is gathered by walking the whole JSON tree.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Sections walked before the rest of the document. Deduplication keeps the
/// first spelling seen.
const SECTION_KEYS: [&str; 6] = [
    "skills",
    "teamSkill",
    "awakenings",
    "memoryCard",
    "ultimate",
    "passive",
];

const DESCRIPTION_KEYS: [&str; 6] = ["description", "desc", "effect", "details", "text", "tooltip"];

/// Coefficient credited to "based on max HP" style phrases without a number.
const IMPLICIT_SCALING: f64 = 80.0;

/// Below this total, scaling is treated as plain attack scaling.
const DOMINANT_THRESHOLD: f64 = 50.0;

/// Returns the first key whose value is present and non-empty, as text.
pub fn pick_first(document: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match document.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

/// Collects description-like strings, deduplicated case-insensitively.
pub fn collect_texts(document: &Value) -> Vec<String> {
    let mut texts = Vec::new();

    if let Value::Object(map) = document {
        for key in SECTION_KEYS {
            if let Some(section) = map.get(key) {
                walk(section, &mut texts);
            }
        }
    }
    walk(document, &mut texts);

    let mut seen = HashSet::new();
    texts.retain(|text| seen.insert(text.to_lowercase()));
    texts
}

fn walk(value: &Value, texts: &mut Vec<String>) {
    match value {
        Value::String(s) => push_trimmed(s, texts),
        Value::Array(items) => {
            for item in items {
                walk(item, texts);
            }
        }
        Value::Object(map) => {
            for key in DESCRIPTION_KEYS {
                if let Some(Value::String(s)) = map.get(key) {
                    push_trimmed(s, texts);
                }
            }
            for item in map.values() {
                walk(item, texts);
            }
        }
        _ => {}
    }
}

fn push_trimmed(text: &str, texts: &mut Vec<String>) {
    let text = text.trim();
    if !text.is_empty() {
        texts.push(text.to_string());
    }
}

/// Keyword patterns shared by scaling and archetype detection.
#[derive(Clone, Debug)]
pub struct TextPatterns {
    pub atk_pct: Regex,
    pub hp_pct: Regex,
    pub def_pct: Regex,
    pub based_on_hp: Regex,
    pub based_on_def: Regex,
    pub healing: Regex,
    pub shield: Regex,
    pub taunt: Regex,
    pub debuff: Regex,
    pub dot: Regex,
    pub extra: Regex,
    pub basic: Regex,
    pub crit: Regex,
}

impl TextPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            atk_pct: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*%[^%\n]{0,40}(?:attack power|atk)")?,
            hp_pct: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*%[^%\n]{0,40}(?:max hp|maximum hp|hp)")?,
            def_pct: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*%[^%\n]{0,40}(?:defense|def)")?,
            based_on_hp: Regex::new(r"(?i)(?:based on|scales with)[^.\n]{0,60}(?:max hp|hp)")?,
            based_on_def: Regex::new(r"(?i)(?:based on|scales with)[^.\n]{0,60}(?:defense|def)")?,
            healing: Regex::new(r"(?i)heal|healing|restore hp|회복|치유|hp를 회복")?,
            shield: Regex::new(r"(?i)shield|보호막|실드")?,
            taunt: Regex::new(r"(?i)taunt|도발")?,
            debuff: Regex::new(r"(?i)debuff|디버프|def down|방깎|취약|받는 피해 증가")?,
            dot: Regex::new(r"(?i)damage over time|dot|지속 피해|도트|bleed|burn|poison")?,
            extra: Regex::new(r"(?i)extra attack|추가 공격|추가타")?,
            basic: Regex::new(r"(?i)basic attack|일반 공격|기본 공격")?,
            crit: Regex::new(r"(?i)critical|치명|crit rate|crit dmg|crit damage")?,
        })
    }
}

/// Stat a character's damage scales with.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScalingStat {
    Atk,
    Hp,
    Def,
}

/// Summed percentage coefficients per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StatWeights {
    pub atk: f64,
    pub hp: f64,
    pub def: f64,
}

impl StatWeights {
    /// Sums `N% ... attack/hp/defense` coefficients over all texts.
    pub fn parse(texts: &[String], patterns: &TextPatterns) -> Self {
        let mut weights = Self::default();
        for text in texts {
            weights.atk += sum_coefficients(&patterns.atk_pct, text);
            weights.hp += sum_coefficients(&patterns.hp_pct, text);
            weights.def += sum_coefficients(&patterns.def_pct, text);

            if patterns.based_on_hp.is_match(text) {
                weights.hp += IMPLICIT_SCALING;
            }
            if patterns.based_on_def.is_match(text) {
                weights.def += IMPLICIT_SCALING;
            }
        }
        weights
    }

    /// The largest weight, or attack when no weight is significant.
    pub fn dominant(&self) -> ScalingStat {
        let mut best = (ScalingStat::Atk, self.atk);
        for candidate in [(ScalingStat::Hp, self.hp), (ScalingStat::Def, self.def)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        if best.1 < DOMINANT_THRESHOLD {
            ScalingStat::Atk
        } else {
            best.0
        }
    }
}

fn sum_coefficients(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patterns() -> TextPatterns {
        TextPatterns::new().expect("patterns compile")
    }

    #[test]
    fn test_collect_texts_walks_sections_and_dedups() {
        let doc = json!({
            "name": "Nina",
            "skills": [
                {"name": "Blaze", "description": "Deals 120% ATK to one enemy."},
                {"name": "Ember", "desc": "  "}
            ],
            "ultimate": {"tooltip": "DEALS 120% atk to one enemy."},
            "rarity": 5
        });

        let texts = collect_texts(&doc);
        assert_eq!(texts[0], "Deals 120% ATK to one enemy.");
        assert_eq!(texts[1], "Blaze");
        assert!(!texts.iter().any(|t| t == "DEALS 120% atk to one enemy."));
        assert!(texts.contains(&"Nina".to_string()));
        assert!(!texts.iter().any(|t| t.trim().is_empty()));
    }

    #[test]
    fn test_pick_first_skips_empty_values() {
        let doc = json!({"id": "", "slug": [], "key": null, "code": 42, "nameId": "x"});
        assert_eq!(
            pick_first(&doc, &["id", "slug", "key", "code", "nameId"]).as_deref(),
            Some("42")
        );
        assert_eq!(pick_first(&doc, &["missing"]), None);
    }

    #[test]
    fn test_scaling_sums_coefficients() {
        let texts = vec![
            "Deals 120% attack power and 30.5% ATK as bonus damage.".to_string(),
            "Heals allies for 15% of max HP.".to_string(),
            "Damage scales with the caster's Defense.".to_string(),
        ];
        let weights = StatWeights::parse(&texts, &patterns());
        assert_eq!(weights.atk, 150.5);
        assert_eq!(weights.hp, 15.0);
        assert_eq!(weights.def, 80.0);
        assert_eq!(weights.dominant(), ScalingStat::Atk);
    }

    #[test]
    fn test_dominant_defaults_to_atk_when_small() {
        let weights = StatWeights {
            atk: 0.0,
            hp: 45.0,
            def: 10.0,
        };
        assert_eq!(weights.dominant(), ScalingStat::Atk);

        let weights = StatWeights {
            atk: 40.0,
            hp: 90.0,
            def: 90.0,
        };
        assert_eq!(weights.dominant(), ScalingStat::Hp);
    }
}
