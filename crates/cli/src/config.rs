//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use chrono::TimeDelta;

/// Defaults for command-line flags, read from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub roster_path: Option<PathBuf>,
    pub weights_path: Option<PathBuf>,
    pub spellings_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub roster_max_age: Option<TimeDelta>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PARTY_ROSTER_PATH` - Roster catalog used when `--roster` is omitted
    /// - `PARTY_WEIGHTS_PATH` - TOML scoring weights (default: built-in weights)
    /// - `PARTY_SPELLINGS_PATH` - RON spelling table (default: built-in table)
    /// - `PARTY_LOG_DIR` - Also write logs to `party.log` in this directory
    /// - `PARTY_ROSTER_MAX_AGE_SECS` - Reload cached rosters older than this
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            var(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };

        Self {
            roster_path: path("PARTY_ROSTER_PATH"),
            weights_path: path("PARTY_WEIGHTS_PATH"),
            spellings_path: path("PARTY_SPELLINGS_PATH"),
            log_dir: path("PARTY_LOG_DIR"),
            roster_max_age: read_var::<i64>(&var, "PARTY_ROSTER_MAX_AGE_SECS")
                .filter(|secs| *secs >= 0)
                .and_then(TimeDelta::try_seconds),
        }
    }
}

fn read_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    var(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment() {
        assert_eq!(config(&[]), CliConfig::default());
    }

    #[test]
    fn test_reads_paths_and_max_age() {
        let config = config(&[
            ("PARTY_ROSTER_PATH", "data/roster.json"),
            ("PARTY_LOG_DIR", "  "),
            ("PARTY_ROSTER_MAX_AGE_SECS", "600"),
        ]);
        assert_eq!(config.roster_path, Some(PathBuf::from("data/roster.json")));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.roster_max_age, TimeDelta::try_seconds(600));
    }

    #[test]
    fn test_invalid_max_age_ignored() {
        assert_eq!(config(&[("PARTY_ROSTER_MAX_AGE_SECS", "soon")]).roster_max_age, None);
        assert_eq!(config(&[("PARTY_ROSTER_MAX_AGE_SECS", "-5")]).roster_max_age, None);
    }
}
