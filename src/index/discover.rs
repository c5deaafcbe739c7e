use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which files and directories the walk leaves out.
///
/// All comparisons are done on lower-cased names. Extensions are stored with
/// their leading dot (`.jar`).
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    pub extensions: HashSet<String>,
    pub directories: HashSet<String>,
    /// Directories whose name starts with one of these are skipped
    pub directory_prefixes: HashSet<String>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self {
            directory_prefixes: HashSet::from([".".to_string()]),
            ..Self::default()
        }
    }

    /// Add extensions, with or without their leading dot.
    pub fn exclude_extensions<I, S>(&mut self, extensions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let ext = ext.as_ref().trim().to_lowercase();
            if ext.is_empty() {
                continue;
            }
            let ext = if ext.starts_with('.') { ext } else { format!(".{}", ext) };
            self.extensions.insert(ext);
        }
        self
    }

    pub fn exclude_directories<I, S>(&mut self, directories: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.directories.extend(
            directories
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty()),
        );
        self
    }

    pub fn may_use_directory(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        if self
            .directory_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
        {
            return false;
        }
        !self.directories.contains(&name)
    }

    pub fn may_use_file(&self, path: &Path) -> bool {
        match file_extension(path) {
            Some(ext) => !self.extensions.contains(&ext),
            None => true,
        }
    }
}

/// Lower-cased suffix of the file name from its last dot, dot included.
/// A dotfile without another dot (`.env`) is all extension.
fn file_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.rfind('.').map(|idx| name[idx..].to_lowercase())
}

/// Recursively list the files under `root` that survive `exclusions`.
///
/// Paths are absolute and returned in a stable, name-sorted order. The walk
/// does not follow symlinks and ignores `.gitignore` files.
pub fn find_files(root: &Path, exclusions: &Exclusions) -> Result<Vec<PathBuf>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", root.display()))?;

    let filter = exclusions.clone();
    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            // The root itself is always walked
            if entry.depth() == 0 {
                return true;
            }
            match entry.file_type() {
                Some(ft) if ft.is_dir() => filter.may_use_directory(&entry.file_name().to_string_lossy()),
                _ => true,
            }
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if is_file && exclusions.may_use_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), files = files.len(), "discovered files");
    Ok(files)
}
