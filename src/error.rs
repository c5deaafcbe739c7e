//! Error types for the index core.
//!
//! Only three things can go wrong inside the core: a query names a character
//! the trie cannot hold, a file cannot be opened or read, or a line is longer
//! than the scan ceiling. Empty results are never errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by indexing, querying and context extraction.
#[derive(Debug, Error)]
pub enum SolError {
    /// The query contains a character outside `[a-z0-9_]` after case folding.
    #[error("Invalid character in search query: {0:?}")]
    InvalidQueryCharacter(char),

    /// A file could not be opened or scanned.
    #[error("Cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line exceeded the scan buffer ceiling.
    #[error("Line {line} of {} is longer than {limit} bytes", path.display())]
    LineTooLong {
        path: PathBuf,
        line: u32,
        limit: usize,
    },
}

impl SolError {
    /// True for errors that only affect the current query.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::InvalidQueryCharacter(_))
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileUnreadable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_classification() {
        assert!(SolError::InvalidQueryCharacter(' ').is_query_error());
        let err = SolError::unreadable("/missing", io::Error::from(io::ErrorKind::NotFound));
        assert!(!err.is_query_error());
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = SolError::LineTooLong {
            path: PathBuf::from("/a/b.txt"),
            line: 7,
            limit: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("/a/b.txt"));
        assert!(msg.contains("Line 7"));
    }
}
