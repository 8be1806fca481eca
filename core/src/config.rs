use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const ENV_HOME: &str = "CONCEPT_COURT_HOME";
pub const ENV_RECENT: &str = "CONCEPT_COURT_RECENT";
pub const ENV_JOURNAL: &str = "CONCEPT_COURT_JOURNAL";

pub const DEFAULT_DATA_DIR: &str = ".concept_court";
pub const DEFAULT_RECENT_LIMIT: usize = 7;
pub const JOURNAL_FILE: &str = "journal.ndjson";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourtConfig {
    pub data_dir: PathBuf,
    pub recent_limit: usize,
    pub journal_enabled: bool,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            recent_limit: DEFAULT_RECENT_LIMIT,
            journal_enabled: true,
        }
    }
}

impl CourtConfig {
    /// Reads overrides from the process environment. Bad values fall back to
    /// defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup(ENV_HOME)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let recent_limit = match lookup(ENV_RECENT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key = ENV_RECENT, value = %raw, "not a count; using default");
                defaults.recent_limit
            }),
            None => defaults.recent_limit,
        };
        let journal_enabled = match lookup(ENV_JOURNAL) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(key = ENV_JOURNAL, value = %raw, "not a flag; using default");
                defaults.journal_enabled
            }),
            None => defaults.journal_enabled,
        };
        Self {
            data_dir,
            recent_limit,
            journal_enabled,
        }
    }

    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.join(JOURNAL_FILE)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
