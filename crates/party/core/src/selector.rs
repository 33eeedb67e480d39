//! Greedy party assembly.
//!
//! A single deterministic pass:
//!
//! 1. Resolve `owned`, `required`, `focus` and `banned` to ids.
//! 2. Pool = owned ids present in the roster and not banned, in owned order.
//!    A pool smaller than the party size is the only hard failure.
//! 3. Required ids missing from the pool become soft issues.
//! 4. Score every pool member.
//! 5. Seat required pool members first (required order, capped at the party
//!    size), then fill from the remaining pool sorted by descending score.
//!    Ties keep pool order.

use std::collections::HashSet;

use crate::character::Character;
use crate::config::ScoringWeights;
use crate::request::{RawRequest, RecommendationRequest};
use crate::resolver::{IdentityResolver, Resolution};
use crate::result::{BestParty, Issue, PartyMember, PartyResult, RequestEcho};
use crate::roster::Roster;
use crate::scoring::{PartyScorer, ScoreBreakdown};

/// Party recommendation engine.
///
/// # Determinism
///
/// No randomness, no I/O, no hash-order dependence: identical requests over
/// identical rosters produce identical results.
#[derive(Clone, Debug, Default)]
pub struct PartySelector {
    weights: ScoringWeights,
}

impl PartySelector {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Validates a raw payload and recommends a party for it.
    pub fn recommend_payload(&self, raw: RawRequest, roster: &Roster) -> PartyResult {
        let (request, mut issues) = RecommendationRequest::from_payload(raw);
        let mut result = self.recommend(&request, roster);
        issues.append(&mut result.issues);
        result.issues = issues;
        result
    }

    /// Recommends a party for a validated request.
    pub fn recommend(&self, request: &RecommendationRequest, roster: &Roster) -> PartyResult {
        let party_size = self.weights.party_size;
        let resolver = IdentityResolver::new(roster);
        let mut issues = Vec::new();

        let owned = resolve_field(&resolver, "owned", &request.owned, &mut issues);
        let required = resolve_field(&resolver, "required", &request.required, &mut issues);
        let focus = resolve_field(&resolver, "focus", &request.focus, &mut issues);
        let banned = resolve_field(&resolver, "banned", &request.banned, &mut issues);

        let echo = RequestEcho {
            owned: owned.clone(),
            required: required.clone(),
            focus: focus.clone(),
            banned: banned.clone(),
            enemy_element: request.enemy_element,
            boss_weakness: request.boss_weakness,
        };

        tracing::debug!(
            "PartySelector: mode={} owned={} required={} focus={} banned={}",
            request.mode,
            owned.len(),
            required.len(),
            focus.len(),
            banned.len()
        );

        // Step 1: pool
        let banned: HashSet<&str> = banned.iter().map(String::as_str).collect();
        let pool: Vec<&Character> = owned
            .iter()
            .filter(|id| !banned.contains(id.as_str()))
            .filter_map(|id| roster.get(id))
            .collect();

        if pool.len() < party_size {
            tracing::debug!(
                "PartySelector: pool too small ({} < {})",
                pool.len(),
                party_size
            );
            issues.push(Issue::PoolTooSmall {
                found: pool.len(),
                needed: party_size,
            });
            return PartyResult {
                ok: false,
                mode: request.mode,
                input: echo,
                issues,
                best_party: None,
            };
        }

        // Step 2: required validation
        let pool_ids: HashSet<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        for id in &required {
            if !pool_ids.contains(id.as_str()) {
                issues.push(Issue::RequiredNotInPool { id: id.clone() });
            }
        }

        // Step 3: scoring
        let scorer = PartyScorer::new(
            &self.weights,
            request.mode,
            request.enemy_element,
            request.boss_weakness,
            focus,
        );
        let scored: Vec<(&Character, ScoreBreakdown)> =
            pool.iter().map(|&c| (c, scorer.score(c))).collect();

        // Step 4: assembly
        let mut party: Vec<PartyMember> = Vec::with_capacity(party_size);
        let mut seated: HashSet<&str> = HashSet::with_capacity(party_size);

        for id in &required {
            if party.len() == party_size {
                tracing::debug!("PartySelector: dropping excess required member {}", id);
                continue;
            }
            if let Some((character, breakdown)) = scored.iter().find(|(c, _)| &c.id == id) {
                seated.insert(character.id.as_str());
                party.push(PartyMember::new(character, *breakdown, true));
            }
        }

        let mut remainder: Vec<&(&Character, ScoreBreakdown)> = scored
            .iter()
            .filter(|(c, _)| !seated.contains(c.id.as_str()))
            .collect();
        // Stable: equal scores keep pool order.
        remainder.sort_by(|a, b| b.1.total().cmp(&a.1.total()));

        for (character, breakdown) in remainder {
            if party.len() == party_size {
                break;
            }
            party.push(PartyMember::new(character, *breakdown, false));
        }

        // Step 5: output
        if party.len() < party_size {
            issues.push(Issue::PartyIncomplete {
                size: party.len(),
                needed: party_size,
            });
        }

        let members: Vec<&Character> = party
            .iter()
            .filter_map(|m| roster.get(&m.id))
            .collect();
        let analysis = scorer.analyze(&members);
        let total_score: i32 = party.iter().map(|m| m.score).sum();

        tracing::debug!(
            "PartySelector: best party = [{}] (total={})",
            party
                .iter()
                .map(|m| m.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            total_score
        );

        PartyResult {
            ok: true,
            mode: request.mode,
            input: echo,
            issues,
            best_party: Some(BestParty {
                party_size,
                total_score,
                members: party,
                analysis,
            }),
        }
    }
}

/// Recommends a party with the default weights.
pub fn recommend(request: &RecommendationRequest, roster: &Roster) -> PartyResult {
    PartySelector::default().recommend(request, roster)
}

fn resolve_field(
    resolver: &IdentityResolver<'_>,
    field: &'static str,
    tokens: &[String],
    issues: &mut Vec<Issue>,
) -> Vec<String> {
    let Resolution { ids, unknown } = resolver.resolve_detailed(tokens);
    issues.extend(
        unknown
            .into_iter()
            .map(|token| Issue::UnknownCharacter { field, token }),
    );
    ids
}
