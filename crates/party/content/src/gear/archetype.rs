//! Build archetypes and their stat preferences.

use serde::Serialize;

use super::text::{ScalingStat, StatWeights, TextPatterns};

/// Rune set used when an archetype's preferred 4-piece set is unavailable.
pub const FALLBACK_PRIMARY: &str = "Alpha";
/// Rune set used when an archetype's preferred 2-piece set is unavailable.
pub const FALLBACK_SECONDARY: &str = "Beth";

/// Gear archetype inferred from class hints and skill texts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Archetype {
    Healer,
    Tank,
    Dot,
    Extra,
    Debuffer,
    HpDps,
    DefDps,
    BasicDps,
    CritDps,
    Dps,
}

impl Archetype {
    /// First matching rule wins: support roles, then damage mechanics, then
    /// the dominant scaling stat, then attack style.
    pub fn classify(
        class: &str,
        texts: &[String],
        scaling: &StatWeights,
        patterns: &TextPatterns,
    ) -> Self {
        let class = class.to_lowercase();
        let blob = texts
            .iter()
            .map(|t| t.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        if class.contains("healer") || patterns.healing.is_match(&blob) {
            return Archetype::Healer;
        }
        if ["defender", "tank", "guardian"].iter().any(|hint| class.contains(hint))
            || patterns.shield.is_match(&blob)
            || patterns.taunt.is_match(&blob)
        {
            return Archetype::Tank;
        }
        if patterns.dot.is_match(&blob) {
            return Archetype::Dot;
        }
        if patterns.extra.is_match(&blob) {
            return Archetype::Extra;
        }
        if patterns.debuff.is_match(&blob) {
            return Archetype::Debuffer;
        }

        match scaling.dominant() {
            ScalingStat::Hp => return Archetype::HpDps,
            ScalingStat::Def => return Archetype::DefDps,
            ScalingStat::Atk => {}
        }

        if patterns.basic.is_match(&blob) {
            Archetype::BasicDps
        } else if patterns.crit.is_match(&blob) {
            Archetype::CritDps
        } else {
            Archetype::Dps
        }
    }

    /// Preferred (4-piece, 2-piece) rune sets.
    pub const fn preferred_sets(self) -> (&'static str, &'static str) {
        match self {
            Archetype::BasicDps | Archetype::Dps => ("Alpha", "Beth"),
            Archetype::CritDps => ("Beth", "Alpha"),
            Archetype::HpDps | Archetype::DefDps => ("Alpha", "Zahn"),
            Archetype::Dot => ("Gimel", "Beth"),
            Archetype::Extra => ("Hert", "Beth"),
            Archetype::Debuffer => ("Giants", "Beth"),
            Archetype::Healer => ("Daleth", "Zahn"),
            Archetype::Tank => ("Shattered Foundation", "Zahn"),
        }
    }

    /// Main stats for slots 4, 5 and 6. Slots 1-3 are fixed flat stats.
    ///
    /// Damage dealers take their element's damage bonus on slot 5 when the
    /// element is known.
    pub fn main_stats(self, element: &str) -> [String; 3] {
        let element_damage = |otherwise: &str| {
            if element.is_empty() {
                otherwise.to_string()
            } else {
                format!("{element} Attribute Damage %")
            }
        };

        match self {
            Archetype::Healer => [
                "Healing Effectiveness %".into(),
                "HP %".into(),
                "HP %".into(),
            ],
            Archetype::Tank => ["HP %".into(), "Defense %".into(), "HP %".into()],
            Archetype::Debuffer => [
                "Attack Penetration %".into(),
                "Attack %".into(),
                "Attack %".into(),
            ],
            Archetype::Dot | Archetype::Extra => [
                "Attack %".into(),
                element_damage("Attack %"),
                "Attack %".into(),
            ],
            Archetype::HpDps => [
                "Critical Rate %".into(),
                element_damage("HP %"),
                "HP %".into(),
            ],
            Archetype::DefDps => [
                "Critical Rate %".into(),
                element_damage("Defense %"),
                "Defense %".into(),
            ],
            Archetype::BasicDps | Archetype::CritDps | Archetype::Dps => [
                "Critical Rate %".into(),
                element_damage("Attack %"),
                "Attack %".into(),
            ],
        }
    }

    pub const fn substats_priority(self) -> [&'static str; 4] {
        match self {
            Archetype::Healer => [
                "Healing Effectiveness %",
                "HP %",
                "Defense %",
                "Energy-related (if exists)",
            ],
            Archetype::Tank => [
                "HP %",
                "Defense %",
                "Damage Reduction (if exists)",
                "Energy-related (if exists)",
            ],
            Archetype::Debuffer => [
                "Attack %",
                "Attack Penetration",
                "Critical Rate %",
                "Energy-related (if exists)",
            ],
            Archetype::Dot => [
                "Attack %",
                "Attack Penetration",
                "Critical Rate % (optional)",
                "Energy-related (if exists)",
            ],
            Archetype::Extra => [
                "Attack %",
                "Critical Rate %",
                "Critical Damage %",
                "Attack Penetration",
            ],
            Archetype::HpDps => [
                "HP %",
                "Critical Rate %",
                "Critical Damage %",
                "Attack Penetration",
            ],
            Archetype::DefDps => [
                "Defense %",
                "Critical Rate %",
                "Critical Damage %",
                "Attack Penetration",
            ],
            Archetype::BasicDps | Archetype::CritDps | Archetype::Dps => [
                "Critical Rate %",
                "Critical Damage %",
                "Attack %",
                "Attack Penetration",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(class: &str, texts: &[&str]) -> Archetype {
        let patterns = TextPatterns::new().expect("patterns compile");
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let scaling = StatWeights::parse(&texts, &patterns);
        Archetype::classify(class, &texts, &scaling, &patterns)
    }

    #[test]
    fn test_class_hints_take_priority() {
        assert_eq!(classify("Healer", &["Deals 200% ATK."]), Archetype::Healer);
        assert_eq!(classify("Guardian", &["Deals 200% ATK."]), Archetype::Tank);
    }

    #[test]
    fn test_rules_apply_in_order() {
        assert_eq!(classify("", &["Restore HP to all allies each turn."]), Archetype::Healer);
        assert_eq!(classify("", &["Gains a shield each turn."]), Archetype::Tank);
        assert_eq!(classify("", &["Inflicts burn for 2 turns."]), Archetype::Dot);
        assert_eq!(classify("", &["Triggers an extra attack."]), Archetype::Extra);
        assert_eq!(classify("", &["Applies a debuff to the target."]), Archetype::Debuffer);
        assert_eq!(classify("", &["Deals 150% of max HP as damage."]), Archetype::HpDps);
        assert_eq!(classify("", &["Damage based on Defense."]), Archetype::DefDps);
        assert_eq!(classify("", &["Basic attack deals 110% ATK."]), Archetype::BasicDps);
        assert_eq!(classify("", &["Critical hits deal 90% ATK."]), Archetype::CritDps);
        assert_eq!(classify("Mage", &["Deals 90% ATK."]), Archetype::Dps);
    }

    #[test]
    fn test_slot_five_prefers_element_damage() {
        assert_eq!(Archetype::Dps.main_stats("Fire")[1], "Fire Attribute Damage %");
        assert_eq!(Archetype::Dps.main_stats("")[1], "Attack %");
        assert_eq!(Archetype::HpDps.main_stats("")[1], "HP %");
        assert_eq!(Archetype::Healer.main_stats("Fire")[1], "HP %");
    }

    #[test]
    fn test_archetype_labels() {
        assert_eq!(Archetype::HpDps.to_string(), "hp_dps");
        assert_eq!(Archetype::Dot.as_ref(), "dot");
        assert_eq!(Archetype::Tank.preferred_sets(), ("Shattered Foundation", "Zahn"));
    }
}
