//! Recommendation results and diagnostics.

use std::fmt;

use crate::character::{Character, Rarity, Role};
use crate::element::Element;
use crate::request::Mode;
use crate::scoring::ScoreBreakdown;

/// Human-readable diagnostic attached to a result.
///
/// Only [`Issue::PoolTooSmall`] is fatal; everything else is a warning that
/// leaves `ok` untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// The owned pool after bans has fewer members than a party needs.
    PoolTooSmall { found: usize, needed: usize },
    /// A required member is not owned, is banned, or is unknown.
    RequiredNotInPool { id: String },
    /// A token matched no roster character.
    UnknownCharacter { field: &'static str, token: String },
    UnknownMode { value: String },
    UnknownElement { field: &'static str, value: String },
    /// Assembly produced fewer members than the party size.
    PartyIncomplete { size: usize, needed: usize },
}

impl Issue {
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Issue::PoolTooSmall { .. })
    }

    /// Stable machine-readable code.
    pub const fn code(&self) -> &'static str {
        match self {
            Issue::PoolTooSmall { .. } => "pool_too_small",
            Issue::RequiredNotInPool { .. } => "required_not_in_pool",
            Issue::UnknownCharacter { .. } => "unknown_character",
            Issue::UnknownMode { .. } => "unknown_mode",
            Issue::UnknownElement { .. } => "unknown_element",
            Issue::PartyIncomplete { .. } => "party_incomplete",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::PoolTooSmall { found, needed } => write!(
                f,
                "owned selection has fewer than {needed} members ({found} available after bans)"
            ),
            Issue::RequiredNotInPool { id } => write!(f, "required member not in pool: {id}"),
            Issue::UnknownCharacter { field, token } => {
                write!(f, "unknown character in {field}: '{token}'")
            }
            Issue::UnknownMode { value } => write!(f, "unknown mode '{value}', using pve"),
            Issue::UnknownElement { field, value } => {
                write!(f, "unknown element '{value}' for {field}, ignored")
            }
            Issue::PartyIncomplete { size, needed } => {
                write!(f, "party has only {size} of {needed} members")
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Issue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Party member annotated with its score at assembly time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartyMember {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub element: Element,
    pub role: Role,
    pub score: i32,
    /// Placed because it was required rather than by score.
    pub required: bool,
    pub breakdown: ScoreBreakdown,
}

impl PartyMember {
    pub fn new(character: &Character, breakdown: ScoreBreakdown, required: bool) -> Self {
        Self {
            id: character.id.clone(),
            name: character.name.clone(),
            rarity: character.rarity,
            element: character.element,
            role: character.role,
            score: breakdown.total(),
            required,
            breakdown,
        }
    }
}

/// Normalised echo of the request, with tokens resolved to ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RequestEcho {
    pub owned: Vec<String>,
    pub required: Vec<String>,
    pub focus: Vec<String>,
    pub banned: Vec<String>,
    pub enemy_element: Option<Element>,
    pub boss_weakness: Option<Element>,
}

/// The assembled party.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BestParty {
    pub party_size: usize,
    pub total_score: i32,
    pub members: Vec<PartyMember>,
    pub analysis: Vec<String>,
}

/// Outcome of a recommendation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartyResult {
    /// False only when the pool is too small to form a party.
    pub ok: bool,
    pub mode: Mode,
    pub input: RequestEcho,
    pub issues: Vec<Issue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub best_party: Option<BestParty>,
}

impl PartyResult {
    /// Members of the best party, or an empty slice on failure.
    pub fn party(&self) -> &[PartyMember] {
        self.best_party
            .as_ref()
            .map(|p| p.members.as_slice())
            .unwrap_or_default()
    }

    pub fn has_issue(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages_are_distinguishable() {
        let pool = Issue::PoolTooSmall {
            found: 3,
            needed: 4,
        };
        let required = Issue::RequiredNotInPool { id: "nina".into() };
        assert!(pool.is_fatal());
        assert!(!required.is_fatal());
        assert!(pool.to_string().starts_with("owned selection has fewer than 4 members"));
        assert_eq!(required.to_string(), "required member not in pool: nina");
        assert_ne!(pool.code(), required.code());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_issue_serializes_as_message() {
        let json = serde_json::to_string(&Issue::RequiredNotInPool { id: "x".into() })
            .expect("serializable");
        assert_eq!(json, r#""required member not in pool: x""#);
    }
}
