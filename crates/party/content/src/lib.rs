//! Catalog data and loaders for the party engine.
//!
//! This crate turns files into `party-core` values:
//! - Roster catalogs (JSON, list or snapshot form)
//! - Canonical name spellings (embedded RON, overridable from a file)
//! - Scoring weights (TOML)
//! - Recommendation payloads (JSON)
//!
//! It also owns the [`RosterCache`] used by long-running callers and the
//! offline rune [`gear`] recommender.
//!
//! The engine itself stays in `party-core` and never touches the filesystem.

pub mod cache;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "gear")]
pub mod gear;

pub use cache::{CacheError, CacheStatus, RosterCache, RosterSource};

#[cfg(feature = "loaders")]
pub use cache::FileRosterSource;

#[cfg(feature = "loaders")]
pub use loaders::{
    RequestLoader, RosterFile, RosterLoader, RosterRecord, SpellingLoader, WeightsLoader,
};

#[cfg(feature = "gear")]
pub use gear::{GearLoader, GearRecommender, GearReport, RuneCatalog};
