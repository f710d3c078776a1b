#![forbid(unsafe_code)]

//! Byte-range tokens produced by the tokenizer.

use std::ops::Range;

use crate::category::Category;

/// A classified byte range in the source text.
///
/// Ranges are always byte offsets into the source. Tokens must satisfy:
/// - `range.start <= range.end`
/// - `range.end <= source.len()`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub category: Category,
    pub range: Range<usize>,
}

impl Token {
    /// Create a token. Panics in debug builds if the range is inverted.
    pub fn new(category: Category, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "token range must be ordered");
        Self { category, range }
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Extract the token's text from a source string.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Validate that token ranges are in-bounds, non-empty and non-overlapping.
pub fn validate_tokens(source: &str, tokens: &[Token]) -> bool {
    let len = source.len();
    let mut prev_end = 0;
    for token in tokens {
        if token.range.start >= token.range.end {
            return false;
        }
        if token.range.end > len {
            return false;
        }
        if token.range.start < prev_end {
            return false; // overlapping
        }
        if !source.is_char_boundary(token.range.start) || !source.is_char_boundary(token.range.end)
        {
            return false;
        }
        prev_end = token.range.end;
    }
    true
}

/// Whether the tokens partition the source: valid, contiguous and complete.
pub fn covers_source(source: &str, tokens: &[Token]) -> bool {
    if !validate_tokens(source, tokens) {
        return false;
    }
    let mut expected = 0;
    for token in tokens {
        if token.range.start != expected {
            return false;
        }
        expected = token.range.end;
    }
    expected == source.len()
}
