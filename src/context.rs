//! Context windows around a hit, with the search term highlighted.
//!
//! Finding a line is token based, but marking it is substring based: every
//! literal occurrence of the search term is highlighted, including ones
//! buried inside a longer word.

use crate::error::Result;
use crate::index::types::{LineNumber, Occurrence};
use crate::utils::lines::LineReader;
use memchr::memmem;
use serde::Serialize;
use std::ops::Range;
use std::path::Path;

/// A piece of a rendered line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: false,
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: true,
        }
    }
}

/// One line of a context window, split into highlight segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub line_number: LineNumber,
    pub segments: Vec<Segment>,
    /// The line was cut at the length limit
    pub truncated: bool,
}

impl RenderedLine {
    /// The (possibly truncated) line text
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.is_match)
    }
}

/// Lines `[max(1, line - before), line + after + 1)`.
pub fn line_window(line: LineNumber, before: u32, after: u32) -> Range<LineNumber> {
    let start = line.saturating_sub(before).max(1);
    let end = line.saturating_add(after).saturating_add(1);
    start..end
}

/// Read the lines of `path` whose numbers fall in `range`.
///
/// The file is scanned from the start and the scan stops once the range is
/// behind it. Lines past the end of the file are simply missing. Invalid
/// UTF-8 is replaced.
pub fn read_lines(path: &Path, range: Range<LineNumber>) -> Result<Vec<(LineNumber, String)>> {
    let mut reader = LineReader::open(path)?;
    let mut lines = Vec::new();

    while let Some((number, line)) = reader.next_line()? {
        if number >= range.end {
            break;
        }
        if number >= range.start {
            lines.push((number, String::from_utf8_lossy(line).into_owned()));
        }
    }

    Ok(lines)
}

/// Extract and highlight the context window around `occurrence`.
pub fn extract_context(
    occurrence: &Occurrence,
    before: u32,
    after: u32,
    line_length_limit: usize,
    search_term: &str,
) -> Result<Vec<RenderedLine>> {
    let range = line_window(occurrence.line, before, after);
    let lines = read_lines(&occurrence.path, range)?;

    Ok(lines
        .into_iter()
        .map(|(number, line)| render_line(number, &line, line_length_limit, search_term))
        .collect())
}

/// Truncate and highlight a single line.
pub fn render_line(
    line_number: LineNumber,
    line: &str,
    line_length_limit: usize,
    search_term: &str,
) -> RenderedLine {
    let (capped, truncated) = truncate_line(line, line_length_limit);
    RenderedLine {
        line_number,
        segments: highlight_segments(capped, search_term),
        truncated,
    }
}

/// Cut `line` to at most `limit` bytes, backing off to a character boundary.
pub fn truncate_line(line: &str, limit: usize) -> (&str, bool) {
    if line.len() <= limit {
        return (line, false);
    }
    (&line[..floor_char_boundary(line, limit)], true)
}

/// Split `line` into alternating plain and matching segments.
///
/// Matching happens on the lower-cased line against `term` (expected to be
/// lower-cased already). The piece lengths found there are then laid over
/// the original text, so matches keep their original casing. When lower
/// casing changes a character's byte length the boundaries are clamped to
/// the line and to character boundaries, and the last segment always runs
/// to the end of the line; highlighting may drift in that case but no text
/// is lost or duplicated.
pub fn highlight_segments(line: &str, term: &str) -> Vec<Segment> {
    if line.is_empty() {
        return Vec::new();
    }
    if term.is_empty() {
        return vec![Segment::plain(line)];
    }

    let folded = line.to_lowercase();

    // (byte length in the folded line, is_match), always ending with a plain piece
    let mut pieces = Vec::new();
    let mut last = 0;
    for start in memmem::find_iter(folded.as_bytes(), term.as_bytes()) {
        pieces.push((start - last, false));
        pieces.push((term.len(), true));
        last = start + term.len();
    }
    pieces.push((folded.len() - last, false));

    let mut segments = Vec::with_capacity(pieces.len());
    let mut at = 0;
    let (tail, body) = match pieces.split_last() {
        Some(split) => split,
        None => return vec![Segment::plain(line)],
    };

    for &(len, is_match) in body {
        let end = floor_char_boundary(line, (at + len).min(line.len())).max(at);
        push_segment(&mut segments, &line[at..end], is_match);
        at = end;
    }
    push_segment(&mut segments, &line[at..], tail.1);

    segments
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, is_match: bool) {
    if !text.is_empty() {
        segments.push(Segment {
            text: text.to_string(),
            is_match,
        });
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
