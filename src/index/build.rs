use crate::error::Result;
use crate::index::trie::{Trie, TrieBuilder};
use crate::index::types::{DEFAULT_MIN_WORD_LENGTH, FileId};
use crate::utils::lines::LineReader;
use crate::utils::progress::Progress;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to do when a file cannot be indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the whole build
    #[default]
    Abort,
    /// Keep whatever was indexed from the file, log a warning, carry on
    Skip,
}

/// Options for a build pass
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub min_word_length: usize,
    pub on_error: ErrorPolicy,
    /// Draw a progress bar on stderr
    pub progress: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            on_error: ErrorPolicy::Abort,
            progress: false,
        }
    }
}

/// Counters collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub lines: u64,
    pub occurrences: usize,
}

/// Build a trie over `files`, failing on the first unreadable file.
pub fn build_index<P: AsRef<Path>>(files: &[P], min_word_length: usize) -> Result<Trie> {
    let options = BuildOptions {
        min_word_length,
        ..BuildOptions::default()
    };
    build_index_with_options(files, &options).map(|(trie, _)| trie)
}

/// Build a trie over `files` in order, one sequential scan per file.
pub fn build_index_with_options<P: AsRef<Path>>(
    files: &[P],
    options: &BuildOptions,
) -> Result<(Trie, BuildStats)> {
    let started = Instant::now();
    let mut builder = TrieBuilder::new(options.min_word_length);
    let mut stats = BuildStats::default();

    let progress = if options.progress {
        Progress::bar(files.len() as u64, "Indexing files...")
    } else {
        Progress::hidden()
    };

    for path in files {
        let path = path.as_ref();
        let file = builder.add_file(path);

        match index_file(&mut builder, file, path) {
            Ok(lines) => {
                stats.files_indexed += 1;
                stats.lines += u64::from(lines);
            }
            Err(err) if options.on_error == ErrorPolicy::Skip => {
                warn!(path = %path.display(), error = %err, "skipping file");
                stats.files_skipped += 1;
            }
            Err(err) => {
                progress.clear();
                return Err(err);
            }
        }

        progress.inc(1);
    }

    let trie = builder.finish();
    stats.occurrences = trie.occurrence_count();

    progress.finish(format!("Indexed {} files", stats.files_indexed));

    info!(
        files = stats.files_indexed,
        skipped = stats.files_skipped,
        lines = stats.lines,
        nodes = trie.node_count(),
        occurrences = stats.occurrences,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "index built"
    );

    Ok((trie, stats))
}

/// Scan one file top to bottom, feeding every line to the builder.
/// Returns the number of lines read.
pub fn index_file(builder: &mut TrieBuilder, file: FileId, path: &Path) -> Result<u32> {
    let mut reader = LineReader::open(path)?;
    while let Some((line_number, line)) = reader.next_line()? {
        builder.add_line(line, file, line_number);
    }
    debug!(path = %path.display(), lines = reader.line_number(), "indexed");
    Ok(reader.line_number())
}
