use crate::index::types::SymbolClass;
use std::ops::Range;

/// Classify a single character after ASCII case folding.
///
/// Returns `None` for boundary characters, which includes every non-ASCII
/// character.
#[inline]
pub fn classify(ch: char) -> Option<SymbolClass> {
    if ch.is_ascii() {
        classify_byte(ch as u8)
    } else {
        None
    }
}

/// Byte-level variant of [`classify`]; folds ASCII uppercase first.
#[inline]
pub fn classify_byte(byte: u8) -> Option<SymbolClass> {
    SymbolClass::from_folded_byte(byte.to_ascii_lowercase())
}

/// A maximal run of indexable bytes within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Original bytes, before folding
    pub text: &'a [u8],
    /// Byte range within the line
    pub span: Range<usize>,
    /// Closed by the end of the line rather than by a boundary character
    pub at_line_end: bool,
}

impl<'a> Token<'a> {
    /// Symbol classes of the token, in order.
    pub fn classes(&self) -> impl Iterator<Item = SymbolClass> + use<'a> {
        // every byte of a token classifies by construction
        self.text.iter().filter_map(|&b| classify_byte(b))
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-folded token text
    pub fn folded(&self) -> String {
        self.text.iter().map(|b| b.to_ascii_lowercase() as char).collect()
    }
}

/// Iterator over the tokens of one line. See [`tokenize`].
pub struct Tokens<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.line;

        // Skip boundaries
        while self.pos < bytes.len() && classify_byte(bytes[self.pos]).is_none() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < bytes.len() && classify_byte(bytes[self.pos]).is_some() {
            self.pos += 1;
        }
        let end = self.pos;

        Some(Token {
            text: &bytes[start..end],
            span: start..end,
            at_line_end: end == bytes.len(),
        })
    }
}

/// Split a line into tokens, left to right.
///
/// A boundary byte closes the pending token and is discarded; the end of the
/// line closes the last one, so a line without a trailing boundary still
/// yields its final token.
pub fn tokenize(line: &[u8]) -> Tokens<'_> {
    Tokens { line, pos: 0 }
}

/// Convenience for callers that only need the folded token strings
pub fn extract_tokens(line: &str) -> Vec<String> {
    tokenize(line.as_bytes()).map(|t| t.folded()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tokens() {
        let tokens = extract_tokens("function main() {");
        assert_eq!(tokens, vec!["function", "main"]);
    }

    #[test]
    fn test_case_folding() {
        let tokens = extract_tokens("Hello There WORLD_2");
        assert_eq!(tokens, vec!["hello", "there", "world_2"]);
    }

    #[test]
    fn test_snake_case_is_one_token() {
        let tokens = extract_tokens("a_request, 123");
        assert_eq!(tokens, vec!["a_request", "123"]);
    }

    #[test]
    fn test_last_token_without_trailing_boundary() {
        let tokens: Vec<_> = tokenize(b"console.log(main").collect();
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].at_line_end);
        assert!(!tokens[1].at_line_end);
        assert!(tokens[2].at_line_end);
        assert_eq!(tokens[2].text, b"main");
        assert_eq!(tokens[2].span, 12..16);
    }

    #[test]
    fn test_trailing_boundary_closes_token() {
        let tokens: Vec<_> = tokenize(b"main)").collect();
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].at_line_end);
    }

    #[test]
    fn test_empty_and_boundary_only_lines() {
        assert_eq!(tokenize(b"").count(), 0);
        assert_eq!(tokenize(b"  (){};  ").count(), 0);
    }

    #[test]
    fn test_non_ascii_is_a_boundary() {
        let tokens = extract_tokens("naïve café");
        assert_eq!(tokens, vec!["na", "ve", "caf"]);
    }

    #[test]
    fn test_classes_follow_folded_text() {
        let token = tokenize(b"Z9_").next().unwrap();
        let classes: Vec<_> = token.classes().map(|c| c.as_char()).collect();
        assert_eq!(classes, vec!['z', '9', '_']);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('Q'), classify('q'));
        assert_ne!(classify('z'), classify('0'));
        assert!(classify(' ').is_none());
        assert!(classify('é').is_none());
    }
}
