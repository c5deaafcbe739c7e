use crate::error::{Result, SolError};
use crate::index::trie::Trie;
use crate::index::types::Occurrence;
use crate::utils::tokenizer::classify;
use tracing::debug;

/// Look up `term` in the trie.
///
/// `term` is expected to be case-folded already; the trailing wildcard of a
/// prefix query must have been stripped and signalled through `prefix`.
///
/// - An unclassifiable character anywhere in the term fails the query.
/// - A path that runs out before the term does yields an empty list.
/// - Exact mode returns the landing node's own occurrences.
/// - Prefix mode returns the landing node's subtree, pre-order, children in
///   ascending class order.
pub fn search<'a>(trie: &'a Trie, term: &str, prefix: bool) -> Result<Vec<&'a Occurrence>> {
    let mut landing = Some(trie.root());

    // Every character is validated, even after the path has run out
    for ch in term.chars() {
        let class = classify(ch).ok_or(SolError::InvalidQueryCharacter(ch))?;
        landing = landing.and_then(|at| trie.child(at, class));
    }

    let Some(at) = landing else {
        return Ok(Vec::new());
    };

    let result = if prefix {
        trie.subtree_occurrences(at)
    } else {
        trie.occurrences(at).iter().collect()
    };

    debug!(term, prefix, hits = result.len(), "query");
    Ok(result)
}

/// Executes searches against one frozen trie
pub struct QueryExecutor<'a> {
    trie: &'a Trie,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        Self { trie }
    }

    pub fn exact(&self, term: &str) -> Result<Vec<&'a Occurrence>> {
        search(self.trie, term, false)
    }

    pub fn prefix(&self, term: &str) -> Result<Vec<&'a Occurrence>> {
        search(self.trie, term, true)
    }

    /// Search with a raw user term: lower-cases it and treats a trailing `*`
    /// as a prefix query.
    pub fn execute(&self, raw: &str) -> Result<Vec<&'a Occurrence>> {
        let term = raw.to_lowercase();
        match term.strip_suffix('*') {
            Some(stem) => search(self.trie, stem, true),
            None => search(self.trie, &term, false),
        }
    }
}
