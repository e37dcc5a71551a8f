// error.rs

use nix::errno::Errno;
use std::path::PathBuf;
use thiserror::Error;

/// Which way a history file was being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Reading,
    Writing,
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenMode::Reading => f.write_str("reading"),
            OpenMode::Writing => f.write_str("writing"),
        }
    }
}

/// Failures of the history commands. The store itself never fails.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("can't find home directory")]
    NoHome,

    #[error("can't open {} for {mode}: {}", path.display(), source.desc())]
    Open {
        path: PathBuf,
        mode: OpenMode,
        #[source]
        source: Errno,
    },

    #[error("write error on {}: {}", path.display(), os_error_text(source))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("usage: {0} [-a] [path]")]
    Usage(String),

    #[error("{command}: {message}")]
    BadArgument { command: String, message: String },
}

/// The `strerror` text of an OS error, without the ` (os error N)` suffix.
fn os_error_text(err: &std::io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => Errno::from_i32(code).desc().to_string(),
        None => err.to_string(),
    }
}
