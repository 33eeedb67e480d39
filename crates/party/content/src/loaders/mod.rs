//! Content loaders for reading catalog data from files.
//!
//! JSON is used for data exchanged with other tools (rosters, requests),
//! RON for hand-maintained tables and TOML for configuration.

pub mod config;
pub mod request;
pub mod roster;
pub mod spellings;

pub use config::WeightsLoader;
pub use request::RequestLoader;
pub use roster::{RosterFile, RosterLoader, RosterRecord};
pub use spellings::SpellingLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
