//! Reader for the sectioned `.solconfig` format.
//!
//! ```text
//! [min-word-length] # comment
//! 4
//!
//! [excl-extensions]
//! jar
//! png
//! ```
//!
//! `#` starts a comment, blank lines are ignored and a section runs until
//! the next known section header.

pub const SECTION_EXCL_EXTENSIONS: &str = "[excl-extensions]";
pub const SECTION_EXCL_DIRECTORIES: &str = "[excl-directories]";
pub const SECTION_MIN_WORD_LENGTH: &str = "[min-word-length]";
pub const SECTION_LIMIT_LINE_LENGTH: &str = "[limit-line-length]";
pub const SECTION_MATCH_BACKGROUND: &str = "[match-background-clr]";
pub const SECTION_MATCH_FOREGROUND: &str = "[match-foreground-clr]";
pub const SECTION_FILE_MATCH_BACKGROUND: &str = "[file-match-background-clr]";
pub const SECTION_FILE_MATCH_FOREGROUND: &str = "[file-match-foreground-clr]";

const ALL_SECTIONS: [&str; 8] = [
    SECTION_EXCL_EXTENSIONS,
    SECTION_EXCL_DIRECTORIES,
    SECTION_MIN_WORD_LENGTH,
    SECTION_LIMIT_LINE_LENGTH,
    SECTION_MATCH_BACKGROUND,
    SECTION_MATCH_FOREGROUND,
    SECTION_FILE_MATCH_BACKGROUND,
    SECTION_FILE_MATCH_FOREGROUND,
];

/// Contents written when no config file exists yet
pub const DEFAULT_CONFIG: &str = "[excl-extensions]
class
jar
exe
jpg
jpeg
png
zip
7z
kotlin_module
iml
gif
svg
ico
ttf
mp3
wav
pdf
mp4
mpeg
bin
dll
o

[excl-directories]
.git
.idea
node_modules
target
__pycache__
venv
lib
lib64
parts
sdist
dist

[min-word-length] # words shorter than this are not searchable; lower number = higher RAM usage
4

[limit-line-length] # output will be limited to 120 characters per search result
120

[match-background-clr]
7D56F4

[match-foreground-clr]
FAFAFA

[file-match-background-clr]
f47d56

[file-match-foreground-clr]
FAFAFA
";

/// A parsed config file: comment-stripped, non-empty lines
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    lines: Vec<String>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content
                .lines()
                .map(trim_line)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Every value line of `section`, in file order.
    pub fn section(&self, section: &str) -> Vec<&str> {
        let mut in_section = false;
        let mut result = Vec::new();

        for line in &self.lines {
            if line == section {
                in_section = true;
                continue;
            }
            if in_section && is_section_header(line) {
                break;
            }
            if in_section {
                result.push(line.as_str());
            }
        }

        result
    }

    /// First value of `section`, if any
    pub fn single(&self, section: &str) -> Option<&str> {
        self.section(section).into_iter().next()
    }
}

fn is_section_header(line: &str) -> bool {
    ALL_SECTIONS.contains(&line)
}

fn trim_line(line: &str) -> &str {
    let without_comment = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    without_comment.trim()
}
