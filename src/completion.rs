// completion.rs

use crate::builtins::BUILTINS;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

/// Completes command names, and file names after the history commands.
pub struct BuiltinCompleter {
    files: FilenameCompleter,
}

impl BuiltinCompleter {
    pub fn new() -> Self {
        Self { files: FilenameCompleter::new() }
    }
}

fn command_names(prefix: &str) -> Vec<Pair> {
    BUILTINS
        .iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| Pair {
            display: name.to_string(),
            replacement: format!("{} ", name),
        })
        .collect()
}

impl Completer for BuiltinCompleter {
    type Candidate = Pair;
    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        let typed = &prefix[start..];
        match typed.split_once(char::is_whitespace) {
            None => Ok((start, command_names(typed))),
            Some(("load-history" | "loadh" | "save-history" | "saveh" | "cd", _)) => {
                self.files.complete(line, pos, ctx)
            }
            Some(_) => Ok((pos, Vec::new())),
        }
    }
}

impl Hinter for BuiltinCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for BuiltinCompleter {}

impl Validator for BuiltinCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for BuiltinCompleter {}
