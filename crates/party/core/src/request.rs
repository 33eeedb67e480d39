//! Recommendation requests and boundary validation.
//!
//! [`RawRequest`] mirrors the loosely typed JSON payload. It is validated into
//! a [`RecommendationRequest`] before entering the engine: absent fields take
//! their defaults and unparseable tags are dropped with a soft [`Issue`].

use crate::element::Element;
use crate::result::Issue;

/// Game mode the party is built for.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Pve,
    Boss,
    Pvp,
}

/// Request payload as received at the service boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawRequest {
    pub mode: Option<String>,
    pub owned: Option<Vec<String>>,
    pub required: Option<Vec<String>>,
    pub focus: Option<Vec<String>>,
    pub banned: Option<Vec<String>>,
    pub enemy_element: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "weakness_element"))]
    pub boss_weakness: Option<String>,
}

/// Validated recommendation request.
///
/// The token lists hold free text; the engine resolves them against the
/// roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub mode: Mode,
    pub owned: Vec<String>,
    pub required: Vec<String>,
    pub focus: Vec<String>,
    pub banned: Vec<String>,
    pub enemy_element: Option<Element>,
    pub boss_weakness: Option<Element>,
}

impl RecommendationRequest {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn owned<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owned = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn required<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn focus<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn banned<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banned = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn enemy_element(mut self, element: Element) -> Self {
        self.enemy_element = Some(element).filter(|e| e.is_set());
        self
    }

    #[must_use]
    pub fn boss_weakness(mut self, element: Element) -> Self {
        self.boss_weakness = Some(element).filter(|e| e.is_set());
        self
    }

    /// Validates a raw payload. Never fails; problems come back as issues.
    pub fn from_payload(raw: RawRequest) -> (Self, Vec<Issue>) {
        let mut issues = Vec::new();

        let mode = match blank_to_none(raw.mode) {
            None => Mode::default(),
            Some(text) => text.parse().unwrap_or_else(|_| {
                tracing::warn!(mode = %text, "unknown mode, falling back to pve");
                issues.push(Issue::UnknownMode { value: text });
                Mode::default()
            }),
        };

        let enemy_element = parse_element("enemy_element", raw.enemy_element, &mut issues);
        let boss_weakness = parse_element("boss_weakness", raw.boss_weakness, &mut issues);

        let request = Self {
            mode,
            owned: raw.owned.unwrap_or_default(),
            required: raw.required.unwrap_or_default(),
            focus: raw.focus.unwrap_or_default(),
            banned: raw.banned.unwrap_or_default(),
            enemy_element,
            boss_weakness,
        };

        (request, issues)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_element(
    field: &'static str,
    value: Option<String>,
    issues: &mut Vec<Issue>,
) -> Option<Element> {
    let text = blank_to_none(value)?;
    let element = Element::parse_context(&text);
    if element.is_none() {
        tracing::warn!(field, value = %text, "unknown element ignored");
        issues.push(Issue::UnknownElement { field, value: text });
    }
    element
}
