//! Element tags and the fixed five-element advantage cycle.
//!
//! ```text
//! Fire ──► Wind ──► Ice ──► Holy ──► Chaos ──► Fire
//! ```
//!
//! An arrow reads "is strong against". The cycle is a constant relation,
//! exposed through [`Element::beats`] and consumed by [`element_bonus`].

use crate::config::ScoringWeights;

/// Elemental attribute of a character or an enemy.
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
#[strum(ascii_case_insensitive)]
pub enum Element {
    Fire,
    Wind,
    Ice,
    Holy,
    Chaos,
    /// Unknown or missing attribute. Never matches any bonus.
    #[default]
    #[strum(serialize = "-")]
    Unset,
}

impl Element {
    /// The five real elements in cycle order.
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Wind,
        Element::Ice,
        Element::Holy,
        Element::Chaos,
    ];

    /// Returns the element this one is strong against.
    pub const fn beats(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Wind),
            Element::Wind => Some(Element::Ice),
            Element::Ice => Some(Element::Holy),
            Element::Holy => Some(Element::Chaos),
            Element::Chaos => Some(Element::Fire),
            Element::Unset => None,
        }
    }

    /// Returns true if `self` is strong against `other`.
    pub fn is_strong_against(self, other: Element) -> bool {
        other.is_set() && self.beats() == Some(other)
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Element::Unset)
    }

    /// Lenient parse: blank or unknown text becomes [`Element::Unset`].
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_default()
    }

    /// Strict parse for request context fields: only the five real elements.
    pub fn parse_context(tag: &str) -> Option<Self> {
        match Self::from_tag(tag) {
            Element::Unset => None,
            element => Some(element),
        }
    }
}

impl From<String> for Element {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.to_string()
    }
}

/// Elemental component of a character's score.
///
/// - `+weakness_match` when the boss weakness is set and equals `character`.
/// - `+advantage` when `character` is strong against `enemy`.
/// - `-disadvantage` when `enemy` is strong against `character`.
///
/// The three checks are evaluated independently and summed.
pub fn element_bonus(
    character: Element,
    enemy: Option<Element>,
    weakness: Option<Element>,
    weights: &ScoringWeights,
) -> i32 {
    if !character.is_set() {
        return 0;
    }

    let mut bonus = 0;

    if weakness == Some(character) {
        bonus += weights.weakness_match;
    }

    if let Some(enemy) = enemy {
        if character.is_strong_against(enemy) {
            bonus += weights.advantage;
        }
        if enemy.is_strong_against(character) {
            bonus -= weights.disadvantage;
        }
    }

    bonus
}
