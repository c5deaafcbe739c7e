//! The interactive search prompt.
//!
//! One request per input line until `:q` or end of input. Bad input and
//! per-result read failures are reported inline and the prompt continues.

use crate::context::{RenderedLine, extract_context};
use crate::index::trie::Trie;
use crate::index::types::Occurrence;
use crate::output::{OutputFormat, Palette, print_context_block, print_grouped, print_json};
use crate::query::executor::search;
use crate::query::parser::{Command, ContextWindow, HELP, SearchRequest, parse_command};
use crate::utils::app_data::SolConfig;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use termcolor::WriteColor;
use tracing::warn;

pub const PROMPT: &str = "Search: ";

/// Serves queries against one frozen trie
pub struct Session<'a> {
    trie: &'a Trie,
    line_length_limit: usize,
    palette: Palette,
    format: OutputFormat,
}

impl<'a> Session<'a> {
    pub fn new(trie: &'a Trie, config: &SolConfig, format: OutputFormat) -> Self {
        Self {
            trie,
            line_length_limit: config.line_length_limit,
            palette: Palette::from_config(config),
            format,
        }
    }

    /// Read requests from `input` until quit or end of input.
    ///
    /// The prompt is only written in text mode so JSON output stays one
    /// object per line.
    pub fn run<R: BufRead, W: WriteColor>(&self, mut input: R, out: &mut W) -> Result<()> {
        let mut line = String::new();

        loop {
            if self.format == OutputFormat::Text {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }

            line.clear();
            let read = input
                .read_line(&mut line)
                .context("Failed to read from input")?;
            if read == 0 {
                if self.format == OutputFormat::Text {
                    writeln!(out)?;
                }
                break;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(out, "{}", HELP)?,
                Ok(Command::Search(request)) => self.handle(&request, out)?,
                Err(err) => writeln!(out, "{}", err)?,
            }
            out.flush()?;
        }

        Ok(())
    }

    /// Run one search and write its results.
    pub fn handle<W: WriteColor>(&self, request: &SearchRequest, out: &mut W) -> Result<()> {
        let hits = match search(self.trie, &request.term, request.prefix) {
            Ok(hits) => hits,
            Err(err) => {
                writeln!(out, "Error: {}", err)?;
                return Ok(());
            }
        };

        match self.format {
            OutputFormat::Text => self.write_text(request, &hits, out),
            OutputFormat::Json => self.write_json(request, &hits, out),
        }
    }

    fn write_text<W: WriteColor>(
        &self,
        request: &SearchRequest,
        hits: &[&Occurrence],
        out: &mut W,
    ) -> Result<()> {
        if hits.is_empty() {
            writeln!(out, "No results")?;
            return Ok(());
        }

        let Some(window) = request.context else {
            print_grouped(out, hits, &self.palette)?;
            return Ok(());
        };

        for &hit in hits {
            match self.context_for(hit, window, &request.term) {
                Some(lines) => print_context_block(out, hit, &lines, &self.palette)?,
                None => writeln!(out, "Error: could not read {}", hit)?,
            }
        }
        Ok(())
    }

    fn write_json<W: WriteColor>(
        &self,
        request: &SearchRequest,
        hits: &[&Occurrence],
        out: &mut W,
    ) -> Result<()> {
        for &hit in hits {
            match request.context {
                Some(window) => {
                    let lines = self.context_for(hit, window, &request.term);
                    print_json(out, hit, Some(lines.as_deref().unwrap_or_default()))?;
                }
                None => print_json(out, hit, None)?,
            }
        }
        Ok(())
    }

    fn context_for(
        &self,
        hit: &Occurrence,
        window: ContextWindow,
        term: &str,
    ) -> Option<Vec<RenderedLine>> {
        match extract_context(
            hit,
            window.before,
            window.after,
            self.line_length_limit,
            term,
        ) {
            Ok(lines) => Some(lines),
            Err(err) => {
                warn!(occurrence = %hit, error = %err, "context extraction failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::build_index;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use termcolor::NoColor;

    fn fixture(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("app.js");
        fs::write(
            &path,
            "random line\nfunction main() {\n  console.log(main)\n0\n",
        )
        .unwrap();
        path
    }

    fn run(trie: &Trie, format: OutputFormat, input: &str) -> String {
        let config = SolConfig {
            min_word_length: 1,
            ..SolConfig::default()
        };
        let session = Session::new(trie, &config, format);
        let mut out = NoColor::new(Vec::new());
        session.run(Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_grouped_results() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let trie = build_index(&[&path], 1).unwrap();

        let text = run(&trie, OutputFormat::Text, "main\n:q\n");
        assert_eq!(text, format!("{}{} #2, 3\n{}", PROMPT, path.display(), PROMPT));
    }

    #[test]
    fn test_no_results_and_errors_keep_the_loop_going() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let trie = build_index(&[&path], 1).unwrap();

        let text = run(&trie, OutputFormat::Text, "nothing\nma-in\n-B x main\nrandom\n");
        assert!(text.contains("No results\n"));
        assert!(text.contains("Error: Invalid character in search query: '-'\n"));
        assert!(text.contains("invalid argument to B x\n"));
        assert!(text.contains(&format!("{} #1\n", path.display())));
        // end of input ends the session with a newline after the prompt
        assert!(text.ends_with(&format!("{}\n", PROMPT)));
    }

    #[test]
    fn test_context_results() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let trie = build_index(&[&path], 1).unwrap();

        let text = run(&trie, OutputFormat::Text, "-A 1 console\n:q\n");
        let expected = format!(
            "{}{}#3\n  console.log(main)\n0\n\n{}",
            PROMPT,
            path.display(),
            PROMPT
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_missing_file_is_reported_per_result() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let trie = build_index(&[&path], 1).unwrap();
        fs::remove_file(&path).unwrap();

        let text = run(&trie, OutputFormat::Text, "-B 1 main\n:q\n");
        assert!(text.contains(&format!("Error: could not read {}#2\n", path.display())));
        assert!(text.contains(&format!("Error: could not read {}#3\n", path.display())));
    }

    #[test]
    fn test_help() {
        let trie = build_index::<PathBuf>(&[], 1).unwrap();
        let text = run(&trie, OutputFormat::Text, "--help\n:quit\n");
        assert!(text.contains(HELP));
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let trie = build_index(&[&path], 1).unwrap();

        let text = run(&trie, OutputFormat::Json, "main*\n-B 1 random\n");
        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["line"], 2);
        assert_eq!(values[1]["line"], 3);
        assert_eq!(values[2]["line"], 1);
        assert_eq!(values[2]["context"][0]["segments"][0]["text"], "random");
        assert_eq!(values[0]["path"], path.to_string_lossy().as_ref());
    }
}
