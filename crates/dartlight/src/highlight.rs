#![forbid(unsafe_code)]

//! Tokenizer plus encoder: source text in, classified spans out.

use tracing::trace;

use crate::encoder::{Fragment, SpanEncoder};
use crate::grammar::{DART, Grammar, GrammarError};
use crate::span::Span;
use crate::token::Token;
use crate::tokenizer::DartTokenizer;

static DEFAULT_HIGHLIGHTER: Highlighter = Highlighter::new(DART);

/// Highlight Dart source with the built-in grammar.
///
/// The result partitions `source`: concatenating the span texts in order
/// gives back `source` exactly, and empty input yields no spans.
///
/// # Example
/// ```
/// use dartlight::{Category, highlight};
///
/// let spans = highlight("class Foo {}");
/// assert_eq!(spans[0].category, Category::Keyword);
/// assert_eq!(spans[2].category, Category::Type);
/// assert_eq!(dartlight::plain_text(&spans), "class Foo {}");
/// ```
pub fn highlight(source: &str) -> Vec<Span<'_>> {
    DEFAULT_HIGHLIGHTER.highlight(source)
}

/// Reusable highlighter bound to one grammar.
///
/// Holds no per-call state; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighter {
    tokenizer: DartTokenizer,
    encoder: SpanEncoder,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DART)
    }
}

impl Highlighter {
    /// Create a highlighter without validating the grammar.
    pub const fn new(grammar: Grammar) -> Self {
        Self {
            tokenizer: DartTokenizer::new(grammar),
            encoder: SpanEncoder::new(),
        }
    }

    /// Create a highlighter after checking the grammar.
    pub fn try_new(grammar: Grammar) -> Result<Self, GrammarError> {
        Ok(Self {
            tokenizer: DartTokenizer::try_new(grammar)?,
            encoder: SpanEncoder::new(),
        })
    }

    pub fn grammar(&self) -> &Grammar {
        self.tokenizer.grammar()
    }

    /// Classified byte ranges of `source`.
    pub fn tokens(&self, source: &str) -> Vec<Token> {
        self.tokenizer.tokenize(source)
    }

    /// Classified spans borrowing from `source`.
    pub fn highlight<'a>(&self, source: &'a str) -> Vec<Span<'a>> {
        let tokens = self.tokenizer.tokenize(source);
        let spans = self.encoder.encode_tokens(source, &tokens);
        trace!(
            grammar = self.grammar().name,
            bytes = source.len(),
            spans = spans.len(),
            "highlighted source"
        );
        spans
    }

    /// Escaped fragments for `source`, ready for [`to_markup`](crate::to_markup).
    pub fn fragments(&self, source: &str) -> Vec<Fragment> {
        self.tokenizer
            .tokenize(source)
            .iter()
            .map(|token| Fragment::from_token(source, token))
            .collect()
    }
}
