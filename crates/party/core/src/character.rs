//! Character records and their attribute tags.
//!
//! Attribute tags parse leniently: blank or unrecognised text becomes the
//! unset tag `"-"`, which never earns a bonus. Catalog data is messy and a
//! character with an unknown role is still a valid party member.

use crate::config::ScoringWeights;
use crate::element::Element;

/// Gacha rarity tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Rarity {
    Ssr,
    Sr,
    R,
    #[default]
    #[strum(serialize = "-")]
    Unset,
}

impl Rarity {
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_default()
    }

    /// Base score contributed by this tier.
    pub const fn score(self, weights: &ScoringWeights) -> i32 {
        match self {
            Rarity::Ssr => weights.rarity_ssr,
            Rarity::Sr => weights.rarity_sr,
            Rarity::R => weights.rarity_r,
            Rarity::Unset => weights.rarity_unset,
        }
    }
}

impl From<String> for Rarity {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        rarity.to_string()
    }
}

/// Combat role of a character.
///
/// Parsing accepts the catalog's historical spellings: `support` is a buffer,
/// `guardian` a tank, `interference` a debuffer.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[strum(to_string = "tank", serialize = "guardian")]
    Tank,
    Healer,
    Dps,
    #[strum(to_string = "buffer", serialize = "support")]
    Buffer,
    #[strum(to_string = "debuffer", serialize = "debuff", serialize = "interference")]
    Debuffer,
    #[default]
    #[strum(serialize = "-")]
    Unset,
}

/// Keyword → role, checked in order. `debuff` precedes `buffer` since the
/// latter is a substring of `debuffer`.
const ROLE_KEYWORDS: [(&str, Role); 8] = [
    ("tank", Role::Tank),
    ("guardian", Role::Tank),
    ("healer", Role::Healer),
    ("debuff", Role::Debuffer),
    ("interference", Role::Debuffer),
    ("support", Role::Buffer),
    ("buffer", Role::Buffer),
    ("dps", Role::Dps),
];

const CLASS_KEYWORDS: [(&str, Role); 9] = [
    ("guardian", Role::Tank),
    ("healer", Role::Healer),
    ("debuff", Role::Debuffer),
    ("interference", Role::Debuffer),
    ("support", Role::Buffer),
    ("buffer", Role::Buffer),
    ("warrior", Role::Dps),
    ("mage", Role::Dps),
    ("rogue", Role::Dps),
];

impl Role {
    /// Parses a role tag. Free-form catalog tags such as "Main DPS" are
    /// matched by keyword.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        tag.parse()
            .unwrap_or_else(|_| Self::from_keywords(tag, &ROLE_KEYWORDS))
    }

    /// Derives a role from a character class when the catalog has no role.
    pub fn from_class(class: &str) -> Self {
        Self::from_keywords(class.trim(), &CLASS_KEYWORDS)
    }

    fn from_keywords(text: &str, keywords: &[(&str, Role)]) -> Self {
        let text = text.to_ascii_lowercase();
        keywords
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|&(_, role)| role)
            .unwrap_or_default()
    }

    /// Resolves a role from an explicit tag, falling back to the class.
    pub fn resolve(role: &str, class: &str) -> Self {
        match Self::from_tag(role) {
            Role::Unset => Self::from_class(class),
            role => role,
        }
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Role::Unset)
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

/// Immutable character record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    /// Canonical lowercase slug, unique within a roster.
    pub id: String,
    /// Display name.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: Role,
    /// Alternate spellings, including historical name variants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity: Rarity::Unset,
            element: Element::Unset,
            role: Role::Unset,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.add_alias(alias);
        self
    }

    /// Adds an alias unless an equal (case-insensitive) alias already exists.
    pub(crate) fn add_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        let alias = alias.trim();
        if alias.is_empty() {
            return;
        }
        if !self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias)) {
            self.aliases.push(alias.to_string());
        }
    }
}
