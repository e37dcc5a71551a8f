// builtins.rs

use crate::config::Config;
use crate::error::HistoryError;
use crate::files::{open_for_reading, open_for_writing};
use crate::history::HistoryStore;
use crate::parser::parse_history_args;
use crate::paths::{home_dir, HistoryPath};
use crate::util::writeln_ignore_broken_pipe;
use itertools::Itertools;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BUILTINS: &[&str] = &[
    "cd",
    "clear-history",
    "exit",
    "history",
    "history-limit",
    "load-history",
    "loadh",
    "pwd",
    "save-history",
    "saveh",
];

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdReturn {
    Normal,
    Error,
    Exit(i32),
}

/// Everything a command may touch: the prompt history, the configuration and
/// the directory relative history paths are resolved against.
pub struct Session {
    pub history: HistoryStore,
    pub config: Config,
    pub cwd: PathBuf,
    home: Box<dyn Fn() -> Option<PathBuf>>,
}

impl Session {
    pub fn new(config: Config, cwd: PathBuf) -> Self {
        Self {
            history: HistoryStore::new(),
            config,
            cwd,
            home: Box::new(home_dir),
        }
    }

    #[cfg(test)]
    fn with_home(mut self, home: impl Fn() -> Option<PathBuf> + 'static) -> Self {
        self.home = Box::new(home);
        self
    }

    /// Records a line typed at the prompt.
    pub fn record(&mut self, line: &str) {
        self.history.add(line, self.config.history_limit);
    }

    fn resolve(&self, arg: Option<&Path>) -> Result<HistoryPath, HistoryError> {
        HistoryPath::resolve(arg, &self.cwd, || (self.home)())
    }

    /// Loads `path` (or the default file) into the history.
    pub fn load_history(&mut self, path: Option<&Path>, append: bool) -> Result<(), HistoryError> {
        let path = self.resolve(path)?;
        let source = open_for_reading(&path)?;
        let summary = self.history.load(source, append, self.config.history_limit);
        info!(
            path = %path.full.display(),
            append,
            installed = summary.installed,
            inserted = summary.inserted,
            "loaded history"
        );
        Ok(())
    }

    /// Saves the history to `path` (or the default file).
    pub fn save_history(&self, path: Option<&Path>, append: bool) -> Result<(), HistoryError> {
        let path = self.resolve(path)?;
        let mut sink = open_for_writing(&path, append)?;
        self.history
            .save(&mut sink)
            .and_then(|_| sink.flush())
            .map_err(|source| HistoryError::Write {
                path: path.shown.clone(),
                source,
            })?;
        info!(path = %path.full.display(), append, count = self.history.len(), "saved history");
        Ok(())
    }
}

/// Runs one builtin. Normal output goes to `out`, diagnostics to `err`.
pub fn run_builtin(
    session: &mut Session,
    tokens: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> CmdReturn {
    let Some((command, args)) = tokens.split_first() else {
        return CmdReturn::Normal;
    };
    debug!(command = command.as_str(), ?args, "running builtin");
    let result = match command.as_str() {
        "load-history" | "loadh" => parse_history_args(command, args)
            .and_then(|parsed| session.load_history(parsed.path.as_deref().map(Path::new), parsed.append)),
        "save-history" | "saveh" => parse_history_args(command, args)
            .and_then(|parsed| session.save_history(parsed.path.as_deref().map(Path::new), parsed.append)),
        "clear-history" => {
            session.history.clear();
            Ok(())
        }
        "history" => list_history(session, args, out),
        "history-limit" => history_limit(session, args, out),
        "pwd" => {
            let _ = writeln_ignore_broken_pipe(out, session.cwd.display());
            Ok(())
        }
        "cd" => change_dir(session, args),
        "exit" => {
            return match args.first().map(|code| code.parse::<i32>()) {
                None => CmdReturn::Exit(0),
                Some(Ok(code)) => CmdReturn::Exit(code),
                Some(Err(_)) => {
                    let _ = writeln_ignore_broken_pipe(err, "exit: numeric argument required");
                    CmdReturn::Exit(255)
                }
            };
        }
        other => {
            let _ = writeln_ignore_broken_pipe(err, format!("{}: command not found", other));
            return CmdReturn::Error;
        }
    };
    match result {
        Ok(()) => CmdReturn::Normal,
        Err(e) => {
            let _ = writeln_ignore_broken_pipe(err, e);
            CmdReturn::Error
        }
    }
}

fn bad_argument(command: &str, message: impl Into<String>) -> HistoryError {
    HistoryError::BadArgument {
        command: command.to_string(),
        message: message.into(),
    }
}

fn list_history(session: &Session, args: &[String], out: &mut dyn Write) -> Result<(), HistoryError> {
    let total = session.history.len();
    let start = match args {
        [] => 0,
        [n] => {
            let n: usize = n
                .parse()
                .map_err(|_| bad_argument("history", format!("{}: numeric argument required", n)))?;
            total.saturating_sub(n)
        }
        _ => return Err(bad_argument("history", "too many arguments")),
    };
    let listing = session
        .history
        .iter()
        .enumerate()
        .skip(start)
        .map(|(i, entry)| format!("{:>5}  {}", i + 1, entry))
        .join("\n");
    if !listing.is_empty() {
        let _ = writeln_ignore_broken_pipe(out, listing);
    }
    Ok(())
}

fn history_limit(session: &mut Session, args: &[String], out: &mut dyn Write) -> Result<(), HistoryError> {
    match args {
        [] => {
            let _ = writeln_ignore_broken_pipe(out, session.config.history_limit);
        }
        [n] => {
            session.config.history_limit = n
                .parse()
                .map_err(|_| bad_argument("history-limit", format!("{}: invalid limit", n)))?;
        }
        _ => return Err(bad_argument("history-limit", "too many arguments")),
    }
    Ok(())
}

fn change_dir(session: &mut Session, args: &[String]) -> Result<(), HistoryError> {
    let home = || (session.home)().ok_or(HistoryError::NoHome);
    let target = match args {
        [] => home()?,
        [dir] if dir == "~" => home()?,
        [dir] => match dir.strip_prefix("~/") {
            Some(rest) => home()?.join(rest),
            None => session.cwd.join(dir),
        },
        _ => return Err(bad_argument("cd", "too many arguments")),
    };
    match std::fs::canonicalize(&target) {
        Ok(dir) if dir.is_dir() => {
            session.cwd = dir;
            Ok(())
        }
        Ok(_) => Err(bad_argument("cd", format!("{}: Not a directory", target.display()))),
        Err(_) => Err(bad_argument(
            "cd",
            format!("{}: No such file or directory", target.display()),
        )),
    }
}
