// config.rs

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Number of prompt history entries kept when `HISTSIZE` is not set.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of history entries.
    pub history_limit: usize,
    /// File loaded when the prompt starts.
    pub history_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("HISTSIZE").ok(), env::var_os("HISTFILE").map(PathBuf::from))
    }

    fn from_vars(histsize: Option<String>, histfile: Option<PathBuf>) -> Self {
        let history_limit = match histsize.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HISTORY_LIMIT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = raw, "ignoring invalid HISTSIZE, using {DEFAULT_HISTORY_LIMIT}");
                DEFAULT_HISTORY_LIMIT
            }),
        };
        Self {
            history_limit,
            history_file: histfile.filter(|p| !p.as_os_str().is_empty()),
        }
    }
}
