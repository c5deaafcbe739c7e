pub mod build;
pub mod discover;
pub mod trie;
pub mod types;

pub use build::{BuildOptions, BuildStats, ErrorPolicy, build_index, build_index_with_options};
pub use discover::{Exclusions, find_files};
pub use trie::{Trie, TrieBuilder};
pub use types::*;
