//! # sol - interactive in-memory word search
//!
//! sol walks a directory tree once, indexes every word of every file into a
//! radix-37 trie held in memory, and then answers whole-word and prefix
//! queries from a prompt, optionally showing highlighted context lines read
//! back from disk.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - File discovery, trie construction and the core types
//! - [`query`] - Prompt input parsing and trie lookups
//! - [`context`] - Context windows and match highlighting
//! - [`output`] - Grouped, context and JSON result formatting
//! - [`repl`] - The interactive prompt loop
//! - [`utils`] - Configuration, tokenizer, line scanning, progress
//!
//! ## Quick Start
//!
//! ```no_run
//! use sol::context::extract_context;
//! use sol::index::{Exclusions, build_index, find_files};
//! use sol::query::search;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Index a directory
//! let files = find_files(Path::new("/path/to/codebase"), &Exclusions::new())?;
//! let trie = build_index(&files, 4)?;
//!
//! // Every word starting with "main"
//! for hit in search(&trie, "main", true)? {
//!     println!("{}", hit);
//!     for line in extract_context(hit, 1, 1, 120, "main")? {
//!         println!("{:>5} {}", line.line_number, line.text());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Memory
//!
//! Only words and their (file, line) pairs are kept; file contents are not.
//! Raising the minimum word length shrinks the number of recorded
//! occurrences, and context lines are always re-read from disk.

pub mod context;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod repl;
pub mod utils;

pub use error::{Result, SolError};
