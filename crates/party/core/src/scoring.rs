//! Per-character scoring.
//!
//! ```text
//! score(c) = rarity(c.rarity)
//!          + element_bonus(c.element, enemy, weakness)
//!          + role_bonus(c.role, mode)
//!          + focus (if c is pinned)
//! ```
//!
//! Each component is kept in a [`ScoreBreakdown`] so results can explain
//! themselves.

use std::collections::HashSet;

use crate::character::{Character, Role};
use crate::config::ScoringWeights;
use crate::element::{Element, element_bonus};
use crate::request::Mode;

/// Score components for a single character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreBreakdown {
    pub rarity: i32,
    pub element: i32,
    pub role: i32,
    pub focus: i32,
}

impl ScoreBreakdown {
    pub const fn total(&self) -> i32 {
        self.rarity + self.element + self.role + self.focus
    }
}

/// Role bonus for the given mode.
///
/// PvP favours tanks and healers, boss fights favour buffers and debuffers.
pub const fn role_bonus(role: Role, mode: Mode, weights: &ScoringWeights) -> i32 {
    match (mode, role) {
        (Mode::Pvp, Role::Tank | Role::Healer) | (Mode::Boss, Role::Buffer | Role::Debuffer) => {
            weights.role_bonus
        }
        _ => 0,
    }
}

/// Scoring context for one request.
#[derive(Clone, Debug)]
pub struct PartyScorer<'w> {
    weights: &'w ScoringWeights,
    mode: Mode,
    enemy: Option<Element>,
    weakness: Option<Element>,
    focus: HashSet<String>,
}

impl<'w> PartyScorer<'w> {
    pub fn new(
        weights: &'w ScoringWeights,
        mode: Mode,
        enemy: Option<Element>,
        weakness: Option<Element>,
        focus: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            weights,
            mode,
            enemy: enemy.filter(|e| e.is_set()),
            weakness: weakness.filter(|e| e.is_set()),
            focus: focus.into_iter().collect(),
        }
    }

    pub fn score(&self, character: &Character) -> ScoreBreakdown {
        let breakdown = ScoreBreakdown {
            rarity: character.rarity.score(self.weights),
            element: element_bonus(character.element, self.enemy, self.weakness, self.weights),
            role: role_bonus(character.role, self.mode, self.weights),
            focus: if self.focus.contains(&character.id) {
                self.weights.focus
            } else {
                0
            },
        };

        tracing::debug!(
            "  Candidate {}: score={} (rarity={}, element={}, role={}, focus={})",
            character.id,
            breakdown.total(),
            breakdown.rarity,
            breakdown.element,
            breakdown.role,
            breakdown.focus
        );

        breakdown
    }

    /// Summarises how well a party fits the battle context.
    pub fn analyze(&self, party: &[&Character]) -> Vec<String> {
        let size = party.len();
        let mut analysis = Vec::new();

        if let Some(weakness) = self.weakness {
            let hits = party.iter().filter(|c| c.element == weakness).count();
            analysis.push(format!("boss weakness ({weakness}) matched: {hits}/{size}"));
        }

        if let Some(enemy) = self.enemy {
            let advantaged = party
                .iter()
                .filter(|c| c.element.is_strong_against(enemy))
                .count();
            let disadvantaged = party
                .iter()
                .filter(|c| enemy.is_strong_against(c.element))
                .count();
            analysis.push(format!(
                "advantage over enemy ({enemy}): {advantaged}/{size}"
            ));
            if disadvantaged > 0 {
                analysis.push(format!(
                    "weak against enemy ({enemy}): {disadvantaged}/{size}"
                ));
            }
        }

        if !self.focus.is_empty() {
            let pinned = party
                .iter()
                .filter(|c| self.focus.contains(&c.id))
                .count();
            analysis.push(format!(
                "focus members included: {pinned}/{}",
                self.focus.len()
            ));
        }

        let has_role = |role: Role| party.iter().any(|c| c.role == role);
        if !has_role(Role::Tank) {
            analysis.push("no tank in party".to_string());
        }
        if !has_role(Role::Healer) {
            analysis.push("no healer in party".to_string());
        }
        if self.mode == Mode::Boss && !has_role(Role::Debuffer) {
            analysis.push("boss fight without a debuffer".to_string());
        }

        analysis
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Rarity;

    #[test]
    fn test_role_bonus_by_mode() {
        let w = ScoringWeights::default();
        assert_eq!(role_bonus(Role::Tank, Mode::Pvp, &w), 6);
        assert_eq!(role_bonus(Role::Healer, Mode::Pvp, &w), 6);
        assert_eq!(role_bonus(Role::Dps, Mode::Pvp, &w), 0);
        assert_eq!(role_bonus(Role::Debuffer, Mode::Boss, &w), 6);
        assert_eq!(role_bonus(Role::Buffer, Mode::Boss, &w), 6);
        assert_eq!(role_bonus(Role::Tank, Mode::Boss, &w), 0);
        assert_eq!(role_bonus(Role::Tank, Mode::Pve, &w), 0);
        assert_eq!(role_bonus(Role::Unset, Mode::Pvp, &w), 0);
    }

    #[test]
    fn test_score_sums_components() {
        let weights = ScoringWeights::default();
        let scorer = PartyScorer::new(
            &weights,
            Mode::Boss,
            Some(Element::Ice),
            Some(Element::Wind),
            ["zephyr".to_string()],
        );
        let zephyr = Character::new("zephyr", "Zephyr")
            .with_rarity(Rarity::Sr)
            .with_element(Element::Wind)
            .with_role(Role::Debuffer);

        let breakdown = scorer.score(&zephyr);
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                rarity: 18,
                element: 45,
                role: 6,
                focus: 18,
            }
        );
        assert_eq!(breakdown.total(), 87);
    }

    #[test]
    fn test_analysis_reports_missing_roles() {
        let weights = ScoringWeights::default();
        let scorer = PartyScorer::new(&weights, Mode::Boss, None, Some(Element::Fire), Vec::new());
        let a = Character::new("a", "A")
            .with_element(Element::Fire)
            .with_role(Role::Tank);
        let b = Character::new("b", "B").with_role(Role::Dps);

        let analysis = scorer.analyze(&[&a, &b]);
        assert_eq!(
            analysis,
            [
                "boss weakness (Fire) matched: 1/2",
                "no healer in party",
                "boss fight without a debuffer",
            ]
        );
    }
}
