// parser.rs

use crate::error::HistoryError;

/// Splits a command line into words the way a shell would, minus expansion.
pub fn split_line(line: &str) -> Vec<String> {
    enum State { Normal, Single, Double }
    let mut words = Vec::new();
    let mut cur = String::new();
    // a quoted empty string ("") is still a word
    let mut started = false;
    let mut state = State::Normal;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\'' => { state = State::Single; started = true; }
                '"' => { state = State::Double; started = true; }
                '\\' => {
                    if let Some(next) = chars.next() {
                        cur.push(next);
                        started = true;
                    }
                }
                c if c.is_whitespace() => {
                    if started {
                        words.push(std::mem::take(&mut cur));
                        started = false;
                    }
                }
                _ => { cur.push(ch); started = true; }
            },
            State::Single => match ch {
                '\'' => state = State::Normal,
                _ => cur.push(ch),
            },
            State::Double => match ch {
                '"' => state = State::Normal,
                '\\' => match chars.peek() {
                    Some(&next) if matches!(next, '\\' | '"' | '$') => {
                        cur.push(next);
                        chars.next();
                    }
                    _ => cur.push('\\'),
                },
                _ => cur.push(ch),
            },
        }
    }
    if started {
        words.push(cur);
    }
    words
}

/// Arguments shared by `load-history` and `save-history`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HistoryArgs {
    pub append: bool,
    pub path: Option<String>,
}

/// Parses `[-a] [path]`.
pub fn parse_history_args(command: &str, args: &[String]) -> Result<HistoryArgs, HistoryError> {
    let usage = || HistoryError::Usage(command.to_string());
    let mut parsed = HistoryArgs::default();
    let mut rest = args.iter();
    for arg in rest.by_ref() {
        if arg == "--" {
            break;
        }
        match arg.strip_prefix('-') {
            Some(flags) if !flags.is_empty() => {
                if !flags.chars().all(|c| c == 'a') {
                    return Err(usage());
                }
                parsed.append = true;
            }
            _ => {
                parsed.path = Some(arg.clone());
                break;
            }
        }
    }
    if parsed.path.is_none() {
        parsed.path = rest.next().cloned();
    }
    if rest.next().is_some() {
        return Err(usage());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split_line("  save-history   -a  x "), words(&["save-history", "-a", "x"]));
    }

    #[test]
    fn honours_quotes_and_escapes() {
        assert_eq!(
            split_line(r#"loadh 'my file' "a \"b\" \n" c\ d"#),
            words(&["loadh", "my file", r#"a "b" \n"#, "c d"])
        );
    }

    #[test]
    fn keeps_empty_quoted_word() {
        assert_eq!(split_line("echo '' x"), words(&["echo", "", "x"]));
    }

    #[test]
    fn history_args_defaults() {
        assert_eq!(parse_history_args("loadh", &[]).unwrap(), HistoryArgs::default());
    }

    #[test]
    fn history_args_flag_and_path() {
        let parsed = parse_history_args("saveh", &words(&["-a", "h.txt"])).unwrap();
        assert_eq!(parsed, HistoryArgs { append: true, path: Some("h.txt".into()) });
    }

    #[test]
    fn double_dash_allows_dash_path() {
        let parsed = parse_history_args("loadh", &words(&["--", "-a"])).unwrap();
        assert_eq!(parsed, HistoryArgs { append: false, path: Some("-a".into()) });
    }

    #[test]
    fn flags_after_path_are_extra_arguments() {
        let err = parse_history_args("load-history", &words(&["h", "-a"])).unwrap_err();
        assert_eq!(err.to_string(), "usage: load-history [-a] [path]");
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        assert!(matches!(
            parse_history_args("loadh", &words(&["-x"])),
            Err(HistoryError::Usage(_))
        ));
    }
}
