use thiserror::Error;

/// Lines of context requested around each hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextWindow {
    pub before: u32,
    pub after: u32,
}

/// One parsed search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Lower-cased term with the wildcard stripped
    pub term: String,
    /// The term ended in `*`
    pub prefix: bool,
    /// `None` when neither `-B` nor `-A` was given
    pub context: Option<ContextWindow>,
}

/// What the user asked for on one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(SearchRequest),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing argument for {0}")]
    MissingArgument(char),
    #[error("invalid argument to {flag} {value}")]
    InvalidArgument { flag: char, value: String },
    #[error("unexpected arg {0}")]
    UnexpectedFlag(String),
    #[error("expected a search term as input")]
    MissingTerm,
    #[error("search term is empty")]
    EmptyTerm,
}

pub const WILDCARD: char = '*';

pub const HELP: &str = "\
During execution: [-B int] [-A int] search[*]
-B: print num lines of leading context before matching lines.
-A: print num lines of trailing context after matching lines.
*:  a trailing asterisk matches every word starting with the search term.

Flags can be placed anywhere, e.g. this is valid: -B 2 search -A 1
Type :q or press Ctrl-D to quit.";

/// Parse one REPL line.
///
/// Words are separated by whitespace. `-B n` and `-A n` set the context
/// window; if only one is given the other defaults to 0. Any other word is
/// the search term (the last one wins).
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let mut words = input.split_whitespace();
    let mut term: Option<&str> = None;
    let mut before: Option<u32> = None;
    let mut after: Option<u32> = None;

    while let Some(word) = words.next() {
        match word {
            "--help" | "-h" => return Ok(Command::Help),
            ":q" | ":quit" => return Ok(Command::Quit),
            "-B" => before = Some(parse_count('B', words.next())?),
            "-A" => after = Some(parse_count('A', words.next())?),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ParseError::UnexpectedFlag(flag.to_string()));
            }
            other => term = Some(other),
        }
    }

    let term = term.ok_or(ParseError::MissingTerm)?.to_lowercase();
    let (term, prefix) = match term.strip_suffix(WILDCARD) {
        Some(stem) => (stem.to_string(), true),
        None => (term, false),
    };
    if term.is_empty() {
        return Err(ParseError::EmptyTerm);
    }

    let context = match (before, after) {
        (None, None) => None,
        (before, after) => Some(ContextWindow {
            before: before.unwrap_or(0),
            after: after.unwrap_or(0),
        }),
    };

    Ok(Command::Search(SearchRequest {
        term,
        prefix,
        context,
    }))
}

fn parse_count(flag: char, value: Option<&str>) -> Result<u32, ParseError> {
    let value = value.ok_or(ParseError::MissingArgument(flag))?;
    value.parse().map_err(|_| ParseError::InvalidArgument {
        flag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(input: &str) -> SearchRequest {
        match parse_command(input) {
            Ok(Command::Search(req)) => req,
            other => panic!("expected a search request, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_term() {
        let req = request("Hello\n");
        assert_eq!(req.term, "hello");
        assert!(!req.prefix);
        assert!(req.context.is_none());
    }

    #[test]
    fn test_prefix_term() {
        let req = request("main*");
        assert_eq!(req.term, "main");
        assert!(req.prefix);
    }

    #[test]
    fn test_context_flags_anywhere() {
        let req = request("-B 2 search -A 1");
        assert_eq!(req.term, "search");
        assert_eq!(req.context, Some(ContextWindow { before: 2, after: 1 }));
    }

    #[test]
    fn test_single_context_flag_defaults_other_to_zero() {
        assert_eq!(
            request("-A 3 foo").context,
            Some(ContextWindow { before: 0, after: 3 })
        );
        assert_eq!(
            request("foo -B 4").context,
            Some(ContextWindow { before: 4, after: 0 })
        );
    }

    #[test]
    fn test_last_term_wins() {
        assert_eq!(request("first second").term, "second");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_command("foo -B"), Err(ParseError::MissingArgument('B')));
        assert_eq!(
            parse_command("foo -A x"),
            Err(ParseError::InvalidArgument {
                flag: 'A',
                value: "x".into()
            })
        );
        assert_eq!(
            parse_command("-C 2 foo"),
            Err(ParseError::UnexpectedFlag("-C".into()))
        );
        assert_eq!(parse_command("   "), Err(ParseError::MissingTerm));
        assert_eq!(parse_command("-B 1"), Err(ParseError::MissingTerm));
        assert_eq!(parse_command("*"), Err(ParseError::EmptyTerm));
    }

    #[test]
    fn test_negative_count_is_invalid() {
        assert!(matches!(
            parse_command("foo -B -1"),
            Err(ParseError::InvalidArgument { flag: 'B', .. })
        ));
    }

    #[test]
    fn test_help_and_quit() {
        assert_eq!(parse_command("--help"), Ok(Command::Help));
        assert_eq!(parse_command(":q"), Ok(Command::Quit));
    }

    #[test]
    fn test_lone_dash_is_a_term() {
        // the index will reject it, but parsing accepts it
        assert_eq!(request("-").term, "-");
    }
}
