//! Result formatting for the interactive prompt

use crate::context::RenderedLine;
use crate::index::types::{LineNumber, Occurrence};
use crate::utils::app_data::{HexColor, SolConfig};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorSpec, WriteColor};

/// Appended to a context line that was cut at the length limit
const TRUNCATION_MARKER: &str = "...";

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per result, one per line
    Json,
}

/// Colour specs for the two highlighted elements
#[derive(Debug, Clone, Default)]
pub struct Palette {
    /// File paths
    pub file_match: ColorSpec,
    /// Matching segments of context lines
    pub matched: ColorSpec,
}

impl Palette {
    pub fn from_config(config: &SolConfig) -> Self {
        Self {
            file_match: style(config.file_match_foreground, config.file_match_background),
            matched: style(config.match_foreground, config.match_background),
        }
    }
}

fn style(fg: HexColor, bg: HexColor) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(rgb(fg)))
        .set_bg(Some(rgb(bg)))
        .set_bold(true);
    spec
}

fn rgb(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Group hits by file, keeping the order in which files first appear.
/// Line numbers within a file are sorted ascending.
pub fn group_by_file<'a>(hits: &[&'a Occurrence]) -> Vec<(&'a Path, Vec<LineNumber>)> {
    let mut groups: Vec<(&'a Path, Vec<LineNumber>)> = Vec::new();
    let mut index: FxHashMap<&'a Path, usize> = FxHashMap::default();

    for &hit in hits {
        let path: &'a Path = &hit.path;
        let slot = *index.entry(path).or_insert_with(|| {
            groups.push((path, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(hit.line);
    }

    for (_, lines) in &mut groups {
        lines.sort_unstable();
    }
    groups
}

/// Print `path #l1, l2, ...` for every file with a hit
pub fn print_grouped<W: WriteColor>(
    out: &mut W,
    hits: &[&Occurrence],
    palette: &Palette,
) -> io::Result<()> {
    for (path, lines) in group_by_file(hits) {
        out.set_color(&palette.file_match)?;
        write!(out, "{}", path.display())?;
        out.reset()?;
        writeln!(out, " #{}", format_line_numbers(&lines))?;
    }
    Ok(())
}

pub fn format_line_numbers(lines: &[LineNumber]) -> String {
    lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print `path#line`, the highlighted context lines and a blank line
pub fn print_context_block<W: WriteColor>(
    out: &mut W,
    occurrence: &Occurrence,
    lines: &[RenderedLine],
    palette: &Palette,
) -> io::Result<()> {
    out.set_color(&palette.file_match)?;
    write!(out, "{}", occurrence)?;
    out.reset()?;
    writeln!(out)?;

    for line in lines {
        print_rendered_line(out, line, palette)?;
    }

    writeln!(out)
}

fn print_rendered_line<W: WriteColor>(
    out: &mut W,
    line: &RenderedLine,
    palette: &Palette,
) -> io::Result<()> {
    for segment in &line.segments {
        if segment.is_match {
            out.set_color(&palette.matched)?;
            write!(out, "{}", segment.text)?;
            out.reset()?;
        } else {
            write!(out, "{}", segment.text)?;
        }
    }

    if line.truncated {
        writeln!(out, "{}", TRUNCATION_MARKER)
    } else {
        writeln!(out)
    }
}

#[derive(Serialize)]
struct JsonResult<'a> {
    path: &'a Path,
    line: LineNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a [RenderedLine]>,
}

/// Write one result as a single line of JSON
pub fn print_json<W: Write>(
    out: &mut W,
    occurrence: &Occurrence,
    context: Option<&[RenderedLine]>,
) -> io::Result<()> {
    let record = JsonResult {
        path: &occurrence.path,
        line: occurrence.line,
        context,
    };
    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::render_line;
    use std::sync::Arc;
    use termcolor::{Ansi, NoColor};

    fn occurrence(path: &str, line: LineNumber) -> Occurrence {
        Occurrence::new(Arc::from(Path::new(path)), line)
    }

    fn plain_text(write: impl FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = NoColor::new(Vec::new());
        write(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_group_by_file_first_seen_order() {
        let hits = [
            occurrence("/b.rs", 9),
            occurrence("/a.rs", 3),
            occurrence("/b.rs", 2),
            occurrence("/a.rs", 1),
        ];
        let refs: Vec<_> = hits.iter().collect();
        let groups = group_by_file(&refs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], (Path::new("/b.rs"), vec![2, 9]));
        assert_eq!(groups[1], (Path::new("/a.rs"), vec![1, 3]));
    }

    #[test]
    fn test_print_grouped() {
        let hits = [occurrence("/src/main.rs", 12), occurrence("/src/main.rs", 4)];
        let refs: Vec<_> = hits.iter().collect();
        let text = plain_text(|out| print_grouped(out, &refs, &Palette::default()));
        assert_eq!(text, "/src/main.rs #4, 12\n");
    }

    #[test]
    fn test_print_context_block() {
        let hit = occurrence("/src/main.rs", 2);
        let lines = vec![
            render_line(1, "fn helper() {}", 120, "main"),
            render_line(2, "fn main() { helper(); helper(); }", 12, "main"),
        ];
        let text = plain_text(|out| print_context_block(out, &hit, &lines, &Palette::default()));
        assert_eq!(text, "/src/main.rs#2\nfn helper() {}\nfn main() { ...\n\n");
    }

    #[test]
    fn test_matches_are_colored() {
        let hit = occurrence("/f", 1);
        let lines = vec![render_line(1, "a main b", 120, "main")];
        let palette = Palette::from_config(&SolConfig::default());

        let mut out = Ansi::new(Vec::new());
        print_context_block(&mut out, &hit, &lines, &palette).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("\x1b[38;2;250;250;250m"));
        assert!(text.contains("\x1b[0m"));
        assert!(text.contains("main"));
    }

    #[test]
    fn test_print_json() {
        let hit = occurrence("/src/lib.rs", 7);
        let text = plain_text(|out| print_json(out, &hit, None));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["path"], "/src/lib.rs");
        assert_eq!(value["line"], 7);
        assert!(value.get("context").is_none());

        let lines = vec![render_line(7, "pub mod main;", 120, "main")];
        let text = plain_text(|out| print_json(out, &hit, Some(&lines)));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["context"][0]["line_number"], 7);
        assert_eq!(value["context"][0]["segments"][1]["text"], "main");
        assert_eq!(value["context"][0]["segments"][1]["is_match"], true);
    }

    #[test]
    fn test_format_line_numbers() {
        assert_eq!(format_line_numbers(&[]), "");
        assert_eq!(format_line_numbers(&[5]), "5");
        assert_eq!(format_line_numbers(&[1, 2, 30]), "1, 2, 30");
    }
}
