//! Deterministic party recommendation engine for a gacha character roster.
//!
//! `party-core` defines the character model, identity resolution and the
//! greedy party scorer. Everything here is a pure function of its inputs:
//! callers hand in an immutable [`Roster`] snapshot plus a
//! [`RecommendationRequest`] and get a [`PartyResult`] back. Loading rosters,
//! caching them and serving responses belong to `party-content` and the CLI.
//!
//! # Flow
//!
//! ```text
//! raw tokens ──► IdentityResolver ──► canonical ids ──► PartySelector ──► PartyResult
//!                      ▲                                     ▲
//!                   Roster ───────────────────────────────────┘
//! ```
pub mod character;
pub mod config;
pub mod element;
pub mod error;
pub mod request;
pub mod resolver;
pub mod result;
pub mod roster;
pub mod scoring;
pub mod selector;
pub mod slug;

pub use character::{Character, Rarity, Role};
pub use config::ScoringWeights;
pub use element::{Element, element_bonus};
pub use error::RosterError;
pub use request::{Mode, RawRequest, RecommendationRequest};
pub use resolver::{IdentityResolver, Resolution};
pub use result::{BestParty, Issue, PartyMember, PartyResult, RequestEcho};
pub use roster::{CanonicalSpelling, Roster, RosterBuilder, SpellingTable};
pub use scoring::{PartyScorer, ScoreBreakdown};
pub use selector::{PartySelector, recommend};
pub use slug::slug;
