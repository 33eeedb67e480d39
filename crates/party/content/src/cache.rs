//! Roster snapshot cache.
//!
//! Recommendation needs an immutable roster. The cache hands out
//! `Arc<Roster>` snapshots: a refresh swaps the pointer, so a request that
//! already holds a snapshot keeps using it until it finishes.

#[cfg(feature = "loaders")]
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use party_core::Roster;
use thiserror::Error;

/// Errors surfaced by the roster cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("roster cache lock was poisoned")]
    LockPoisoned,

    #[error("roster source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// Produces fresh rosters for the cache.
pub trait RosterSource {
    fn load(&self) -> Result<Roster>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Reads a roster catalog file.
#[cfg(feature = "loaders")]
#[derive(Clone, Debug)]
pub struct FileRosterSource {
    path: PathBuf,
    spellings: Option<PathBuf>,
}

#[cfg(feature = "loaders")]
impl FileRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            spellings: None,
        }
    }

    /// Uses a spelling table file instead of the built-in one.
    #[must_use]
    pub fn with_spellings(mut self, path: impl Into<PathBuf>) -> Self {
        self.spellings = Some(path.into());
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "loaders")]
impl RosterSource for FileRosterSource {
    fn load(&self) -> Result<Roster> {
        use crate::loaders::{RosterLoader, SpellingLoader};

        let spellings = match &self.spellings {
            Some(path) => SpellingLoader::load(path),
            None => SpellingLoader::builtin(),
        }
        .map_err(|e| CacheError::Source(format!("{e:#}")))?;

        RosterLoader::load_with(&self.path, spellings)
            .map_err(|e| CacheError::Source(format!("{e:#}")))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Point-in-time view of the cache for status reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CacheStatus {
    pub characters: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct CacheState {
    roster: Option<Arc<Roster>>,
    last_updated: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// Caches the latest roster loaded from a [`RosterSource`].
pub struct RosterCache<S: RosterSource> {
    source: S,
    max_age: Option<TimeDelta>,
    state: RwLock<CacheState>,
}

impl<S: RosterSource> RosterCache<S> {
    /// Creates an empty cache. Nothing is loaded until first use.
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_age: None,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Snapshots older than `max_age` are reloaded on the next [`get`](Self::get).
    #[must_use]
    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the current snapshot, loading or refreshing it when needed.
    ///
    /// A failed refresh of a stale snapshot still returns the stale snapshot.
    pub fn get(&self) -> Result<Arc<Roster>> {
        match self.refresh(false) {
            Ok(roster) => Ok(roster),
            Err(err) => self.snapshot()?.ok_or(err),
        }
    }

    /// Reloads the roster if forced, missing, or older than `max_age`.
    ///
    /// On failure the previous snapshot is kept and the error is recorded.
    pub fn refresh(&self, force: bool) -> Result<Arc<Roster>> {
        if !force {
            let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
            if let Some(roster) = &state.roster {
                if !self.is_stale(state.last_updated) {
                    return Ok(Arc::clone(roster));
                }
            }
        }

        tracing::debug!(source = %self.source.describe(), force, "refreshing roster");
        let loaded = self.source.load();

        let mut state = self.state.write().map_err(|_| CacheError::LockPoisoned)?;
        match loaded {
            Ok(roster) => {
                let roster = Arc::new(roster);
                state.roster = Some(Arc::clone(&roster));
                state.last_updated = Some(Utc::now());
                state.last_error = None;
                tracing::info!(characters = roster.len(), "roster cache refreshed");
                Ok(roster)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept_previous = state.roster.is_some(),
                    "roster refresh failed"
                );
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Current snapshot without triggering a load.
    pub fn snapshot(&self) -> Result<Option<Arc<Roster>>> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(state.roster.clone())
    }

    /// Time of the last successful load.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.read().ok().and_then(|s| s.last_updated)
    }

    pub fn status(&self) -> Result<CacheStatus> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(CacheStatus {
            characters: state.roster.as_ref().map_or(0, |r| r.len()),
            last_updated: state.last_updated,
            last_error: state.last_error.clone(),
        })
    }

    fn is_stale(&self, last_updated: Option<DateTime<Utc>>) -> bool {
        match (self.max_age, last_updated) {
            (Some(max_age), Some(at)) => Utc::now() - at > max_age,
            (None, Some(_)) => false,
            (_, None) => true,
        }
    }
}
