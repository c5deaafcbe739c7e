//! Radix-37 trie over symbol classes.
//!
//! Nodes live in a single arena and refer to their children by [`NodeId`].
//! A token as long as a whole line produces a path just as deep, so every
//! walk over the structure is iterative and dropping it never recurses.
//!
//! The trie has two phases. [`TrieBuilder`] owns it while files are being
//! indexed and keeps the consolidation state. [`TrieBuilder::finish`]
//! freezes it into a [`Trie`], which is read-only and drops that state.

use super::types::{FileId, LineNumber, NodeId, Occurrence, RADIX, SymbolClass};
use crate::utils::tokenizer::tokenize;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ROOT: NodeId = 0;

/// Empty child slot. The root is never anyone's child, so 0 is free.
const NO_CHILD: NodeId = 0;

#[derive(Debug, Clone)]
struct TrieNode {
    children: [NodeId; RADIX],
    occurrences: Vec<Occurrence>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: [NO_CHILD; RADIX],
            occurrences: Vec::new(),
        }
    }

    #[inline]
    fn child(&self, class: SymbolClass) -> Option<NodeId> {
        match self.children[class.index()] {
            NO_CHILD => None,
            id => Some(id),
        }
    }
}

/// Build-phase owner of the trie.
pub struct TrieBuilder {
    nodes: Vec<TrieNode>,
    min_word_length: usize,
    files: Vec<Arc<Path>>,
    /// (node, file, line) triples already recorded
    seen: FxHashSet<(NodeId, FileId, LineNumber)>,
    occurrence_count: usize,
}

impl TrieBuilder {
    pub fn new(min_word_length: usize) -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            min_word_length,
            files: Vec::new(),
            seen: FxHashSet::default(),
            occurrence_count: 0,
        }
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Register a file and get the id to insert its tokens under.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> FileId {
        let id = self.files.len() as FileId;
        let path: PathBuf = path.into();
        self.files.push(Arc::from(path));
        id
    }

    pub fn file_path(&self, file: FileId) -> Option<&Arc<Path>> {
        self.files.get(file as usize)
    }

    /// Insert one token.
    ///
    /// Nodes along the path are created even when the token is shorter than
    /// the minimum word length; only the occurrence is withheld. Returns
    /// whether an occurrence was recorded.
    pub fn insert<I>(&mut self, classes: I, file: FileId, line: LineNumber) -> bool
    where
        I: IntoIterator<Item = SymbolClass>,
    {
        let mut at = ROOT;
        let mut len = 0usize;
        for class in classes {
            at = self.child_or_insert(at, class);
            len += 1;
        }

        if len < self.min_word_length || !self.seen.insert((at, file, line)) {
            return false;
        }

        let Some(path) = self.files.get(file as usize) else {
            return false;
        };
        let occurrence = Occurrence::new(Arc::clone(path), line);
        self.nodes[at as usize].occurrences.push(occurrence);
        self.occurrence_count += 1;
        true
    }

    /// Tokenize a raw line and insert every token. Returns the number of
    /// occurrences recorded.
    pub fn add_line(&mut self, line: &[u8], file: FileId, line_number: LineNumber) -> usize {
        let mut recorded = 0;
        for token in tokenize(line) {
            if self.insert(token.classes(), file, line_number) {
                recorded += 1;
            }
        }
        recorded
    }

    fn child_or_insert(&mut self, at: NodeId, class: SymbolClass) -> NodeId {
        if let Some(child) = self.nodes[at as usize].child(class) {
            return child;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(TrieNode::new());
        self.nodes[at as usize].children[class.index()] = id;
        id
    }

    /// Freeze the trie. Consolidation state is dropped here.
    pub fn finish(self) -> Trie {
        Trie {
            nodes: self.nodes,
            min_word_length: self.min_word_length,
            files: self.files,
            occurrence_count: self.occurrence_count,
        }
    }
}

/// Read-only trie produced by [`TrieBuilder::finish`].
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    min_word_length: usize,
    files: Vec<Arc<Path>>,
    occurrence_count: usize,
}

impl Trie {
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub fn files(&self) -> &[Arc<Path>] {
        &self.files
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    pub(crate) fn root(&self) -> NodeId {
        ROOT
    }

    pub(crate) fn child(&self, node: NodeId, class: SymbolClass) -> Option<NodeId> {
        self.nodes[node as usize].child(class)
    }

    /// Occurrences attached to exactly this node
    pub(crate) fn occurrences(&self, node: NodeId) -> &[Occurrence] {
        &self.nodes[node as usize].occurrences
    }

    /// Every occurrence in the subtree rooted at `node`, pre-order: a node's
    /// own list first, then its children in ascending class order.
    pub(crate) fn subtree_occurrences(&self, node: NodeId) -> Vec<&Occurrence> {
        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(id) = stack.pop() {
            let current = &self.nodes[id as usize];
            result.extend(current.occurrences.iter());
            // Reverse push so the lowest class is popped first
            stack.extend(
                current
                    .children
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&child| child != NO_CHILD),
            );
        }

        result
    }
}
