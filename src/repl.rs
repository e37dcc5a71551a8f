// repl.rs

use crate::builtins::{run_builtin, CmdReturn, Session};
use crate::completion::BuiltinCompleter;
use crate::config::Config;
use crate::error::HistoryError;
use crate::parser::split_line;
use anyhow::Context;
use nix::errno::Errno;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{CompletionType, Editor};
use std::io;
use tracing::{debug, warn};

type PromptEditor = Editor<BuiltinCompleter, DefaultHistory>;

/// Runs the prompt until `exit` or end of input, returning the exit status.
pub fn start_repl(config: Config) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("can't determine working directory")?;
    let mut session = Session::new(config, cwd);
    autoload(&mut session);

    let editor_config = rustyline::Config::builder()
        .completion_type(CompletionType::List)
        .history_ignore_dups(false)?
        .build();
    let mut rl: PromptEditor = Editor::with_config(editor_config).context("can't start line editor")?;
    rl.set_helper(Some(BuiltinCompleter::new()));
    sync_editor_history(rl.history_mut(), &session)?;

    loop {
        match rl.readline("$ ") {
            Ok(line) => {
                let tokens = split_line(&line);
                if tokens.is_empty() {
                    continue;
                }
                session.record(line.trim());
                let status = run_builtin(&mut session, &tokens, &mut io::stdout(), &mut io::stderr());
                sync_editor_history(rl.history_mut(), &session)?;
                if let CmdReturn::Exit(code) = status {
                    return Ok(code);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(0),
            Err(err) => return Err(err).context("reading input"),
        }
    }
}

/// Loads `HISTFILE`, if configured, replacing the empty startup history.
fn autoload(session: &mut Session) {
    let Some(file) = session.config.history_file.clone() else {
        return;
    };
    match session.load_history(Some(file.as_path()), false) {
        Ok(()) => {}
        Err(HistoryError::Open { source: Errno::ENOENT, .. }) => {
            debug!(path = %file.display(), "no history file yet");
        }
        Err(e) => warn!(path = %file.display(), "startup history not loaded: {e}"),
    }
}

/// Mirrors the session history into the editor's arrow-key recall.
fn sync_editor_history<H: History>(recall: &mut H, session: &Session) -> anyhow::Result<()> {
    recall.set_max_len(session.config.history_limit)?;
    recall.clear()?;
    for entry in session.history.iter() {
        recall.add(entry)?;
    }
    Ok(())
}
