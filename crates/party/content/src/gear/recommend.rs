//! Rune build derivation for a single character.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::archetype::Archetype;
use super::catalog::RuneCatalog;
use super::text::{ScalingStat, StatWeights, TextPatterns, collect_texts, pick_first};

/// Keys checked for the character element.
const ELEMENT_KEYS: [&str; 3] = ["element", "attr", "attribute"];
/// Keys checked for class hints.
const CLASS_KEYS: [&str; 5] = ["class", "job", "roleClass", "type", "role"];

/// Healers with at least this much attack scaling also get a damage build.
const HYBRID_ATK_THRESHOLD: f64 = 180.0;

const FLAT_MAIN_STATS: [&str; 3] = ["HP (Flat)", "Attack (Flat)", "Defense (Flat)"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GearRecommendation {
    pub key: String,
    pub archetype: Archetype,
    pub scaling: ScalingSummary,
    pub builds: Vec<GearBuild>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScalingSummary {
    pub weights: StatWeights,
    pub dominant: ScalingStat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GearBuild {
    pub id: String,
    pub title: String,
    pub sets: BuildSets,
    /// Slot number ("1".."6") to main stat.
    pub main_stats: BTreeMap<String, String>,
    pub substats_priority: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildSets {
    pub primary: SetChoice,
    pub secondary: SetChoice,
}

/// A chosen rune set with its catalog metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SetChoice {
    pub name: String,
    pub pieces: u8,
    pub icon: Option<String>,
    pub effect2: Option<String>,
    pub effect4: Option<String>,
}

/// Derives rune builds from character documents.
#[derive(Clone, Debug)]
pub struct GearRecommender {
    catalog: RuneCatalog,
    patterns: TextPatterns,
}

impl GearRecommender {
    pub fn new(catalog: RuneCatalog) -> Result<Self, regex::Error> {
        Ok(Self {
            catalog,
            patterns: TextPatterns::new()?,
        })
    }

    pub fn catalog(&self) -> &RuneCatalog {
        &self.catalog
    }

    pub fn recommend(&self, key: &str, document: &Value) -> GearRecommendation {
        let texts = collect_texts(document);
        let weights = StatWeights::parse(&texts, &self.patterns);
        let class = pick_first(document, &CLASS_KEYS).unwrap_or_default();
        let archetype = Archetype::classify(&class, &texts, &weights, &self.patterns);
        let element = pick_first(document, &ELEMENT_KEYS)
            .map(|e| e.trim().to_string())
            .unwrap_or_default();

        tracing::debug!(
            "GearRecommender: {} -> {} (atk={}, hp={}, def={})",
            key,
            archetype,
            weights.atk,
            weights.hp,
            weights.def
        );

        let mut builds = vec![self.build(
            "default",
            "Recommended (default)",
            archetype,
            &element,
            vec![
                "Slot 5 on damage dealers prefers damage of the character's own element.".into(),
                "Flag sets restricted to guild raids or specific classes in the UI.".into(),
            ],
        )];

        if archetype == Archetype::Healer && self.is_hybrid_healer(&texts, &weights) {
            builds.push(self.build(
                "sub_dps",
                "Alternative (sub DPS)",
                Archetype::CritDps,
                &element,
                vec![
                    "Fall back to the default support build when healing runs short.".into(),
                    "Offered because attack power coefficients are high.".into(),
                ],
            ));
        }

        GearRecommendation {
            key: key.to_string(),
            archetype,
            scaling: ScalingSummary {
                weights,
                dominant: weights.dominant(),
            },
            builds,
        }
    }

    fn is_hybrid_healer(&self, texts: &[String], weights: &StatWeights) -> bool {
        texts.iter().any(|t| self.patterns.healing.is_match(t))
            && weights.atk >= HYBRID_ATK_THRESHOLD
    }

    fn build(
        &self,
        id: &str,
        title: &str,
        archetype: Archetype,
        element: &str,
        notes: Vec<String>,
    ) -> GearBuild {
        let (primary, secondary) = self.catalog.choose_sets(archetype);

        let main_stats = FLAT_MAIN_STATS
            .iter()
            .map(|stat| stat.to_string())
            .chain(archetype.main_stats(element))
            .enumerate()
            .map(|(slot, stat)| ((slot + 1).to_string(), stat))
            .collect();

        GearBuild {
            id: id.to_string(),
            title: title.to_string(),
            sets: BuildSets {
                primary: self.set_choice(primary, 4),
                secondary: self.set_choice(secondary, 2),
            },
            main_stats,
            substats_priority: archetype
                .substats_priority()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            notes,
        }
    }

    fn set_choice(&self, name: String, pieces: u8) -> SetChoice {
        let meta = self.catalog.get(&name).cloned().unwrap_or_default();
        SetChoice {
            name,
            pieces,
            icon: meta.icon,
            effect2: meta.effect2,
            effect4: meta.effect4,
        }
    }
}
