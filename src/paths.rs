// paths.rs

use crate::error::HistoryError;
use nix::unistd::{Uid, User};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_FILE: &str = ".tmux.history";

/// A history file location resolved from a command's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPath {
    /// Where the file actually lives.
    pub full: PathBuf,
    /// What error messages show: the argument as typed, or the default path.
    pub shown: PathBuf,
    /// True when no argument was given.
    pub is_default: bool,
}

impl HistoryPath {
    /// Resolves `arg` against `cwd`, or falls back to `<home>/.tmux.history`.
    pub fn resolve(
        arg: Option<&Path>,
        cwd: &Path,
        home: impl FnOnce() -> Option<PathBuf>,
    ) -> Result<Self, HistoryError> {
        match arg {
            Some(arg) => Ok(Self {
                full: cwd.join(arg),
                shown: arg.to_path_buf(),
                is_default: false,
            }),
            None => {
                let full = home().ok_or(HistoryError::NoHome)?.join(DEFAULT_HISTORY_FILE);
                Ok(Self {
                    shown: full.clone(),
                    full,
                    is_default: true,
                })
            }
        }
    }
}

/// `$HOME` if set and non-empty, else the current user's account record.
pub fn home_dir() -> Option<PathBuf> {
    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => User::from_uid(Uid::current()).ok().flatten().map(|user| user.dir),
    }
}
