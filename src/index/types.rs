use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Number of symbol classes: 26 letters, 10 digits, underscore.
pub const RADIX: usize = 37;

/// Identifier of an indexed file, in indexing order
pub type FileId = u32;

/// 1-based line number within a file
pub type LineNumber = u32;

/// Handle of a node in the trie arena
pub type NodeId = u32;

/// Longest line the scanners accept (2 MiB).
pub const MAX_LINE_BYTES: usize = 2048 * 1024;

/// Default minimum token length when nothing is configured
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// The bucket a character maps to for trie indexing.
///
/// Letters occupy 0..=25, digits 26..=35 and underscore 36, so no letter
/// ever shares a slot with a digit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolClass(u8);

impl SymbolClass {
    pub const UNDERSCORE: SymbolClass = SymbolClass(36);

    /// Class of an already case-folded byte, `None` for a boundary.
    #[inline]
    pub const fn from_folded_byte(byte: u8) -> Option<Self> {
        match byte {
            b'a'..=b'z' => Some(SymbolClass(byte - b'a')),
            b'0'..=b'9' => Some(SymbolClass(byte - b'0' + 26)),
            b'_' => Some(Self::UNDERSCORE),
            _ => None,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < RADIX).then(|| SymbolClass(index as u8))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The folded character this class stands for.
    pub const fn as_char(self) -> char {
        match self.0 {
            0..=25 => (b'a' + self.0) as char,
            26..=35 => (b'0' + self.0 - 26) as char,
            _ => '_',
        }
    }
}

impl fmt::Debug for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolClass({}={:?})", self.0, self.as_char())
    }
}

/// A recorded hit: one token on one line of one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub path: Arc<Path>,
    pub line: LineNumber,
}

impl Occurrence {
    pub fn new(path: Arc<Path>, line: LineNumber) -> Self {
        Self { path, line }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path.display(), self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_assignment_has_no_overlap() {
        let z = SymbolClass::from_folded_byte(b'z').unwrap();
        let zero = SymbolClass::from_folded_byte(b'0').unwrap();
        assert_ne!(z, zero);
        assert_eq!(z.index(), 25);
        assert_eq!(zero.index(), 26);
        assert_eq!(SymbolClass::from_folded_byte(b'9').unwrap().index(), 35);
        assert_eq!(SymbolClass::UNDERSCORE.index(), RADIX - 1);
    }

    #[test]
    fn test_every_index_round_trips_through_char() {
        for i in 0..RADIX {
            let class = SymbolClass::from_index(i).unwrap();
            assert_eq!(SymbolClass::from_folded_byte(class.as_char() as u8), Some(class));
        }
        assert!(SymbolClass::from_index(RADIX).is_none());
    }

    #[test]
    fn test_boundaries() {
        for b in [b' ', b'-', b'A', b'(', 0xC3] {
            assert!(SymbolClass::from_folded_byte(b).is_none());
        }
    }
}
