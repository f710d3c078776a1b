#![forbid(unsafe_code)]

//! Span encoder and the fragment interchange format.
//!
//! A [`Fragment`] is the raw form of a classified piece of text: a textual
//! category tag plus escaped text (see [`crate::escape`]). Fragments can be
//! written one per line as markup:
//!
//! ```text
//! keyword:"class"
//! plain:" "
//! identifier-type:"Foo"
//! ```
//!
//! [`SpanEncoder`] turns fragments (or tokens) into [`Span`]s. Decoding is
//! total: unknown tags become [`Category::Plain`] and the text is kept.

use std::fmt::{self, Write as _};

use tracing::debug;

use crate::category::Category;
use crate::escape::{decode, escape};
use crate::span::Span;
use crate::token::Token;

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// Category tag plus escaped text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    tag: String,
    text: String,
}

impl Fragment {
    /// Create a fragment from a category and raw (unescaped) text.
    pub fn new(category: Category, text: &str) -> Self {
        Self {
            tag: category.tag().to_string(),
            text: escape(text).into_owned(),
        }
    }

    /// Create a fragment from a tag and already-escaped text, as read from
    /// external data. The tag is not checked.
    pub fn from_parts(tag: impl Into<String>, escaped_text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: escaped_text.into(),
        }
    }

    /// Create a fragment for a token of `source`.
    pub fn from_token(source: &str, token: &Token) -> Self {
        Self::new(token.category, token.text(source))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The escaped text.
    pub fn escaped_text(&self) -> &str {
        &self.text
    }

    /// Parse one markup line strictly.
    pub fn parse_line(line: &str) -> Result<Self, MarkupError> {
        let (tag, rest) = line.split_once(':').ok_or(MarkupError::MissingSeparator)?;
        if Category::try_from_tag(tag).is_none() {
            return Err(MarkupError::UnknownTag(tag.to_string()));
        }
        let text = unquote(rest).ok_or(MarkupError::UnquotedText)?;
        if text.contains('"') {
            return Err(MarkupError::StrayQuote);
        }
        Ok(Self::from_parts(tag, text))
    }
}

impl fmt::Display for Fragment {
    /// Writes the fragment as one markup line, without the line feed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"{}\"", self.tag, self.text)
    }
}

fn unquote(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Write fragments as markup, one line each.
pub fn to_markup(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{fragment}");
    }
    out
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Markup line rejected by [`Fragment::parse_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// No `:` between tag and text.
    MissingSeparator,
    /// The tag is not a category tag.
    UnknownTag(String),
    /// The text is not wrapped in double quotes.
    UnquotedText,
    /// An unescaped double quote inside the text.
    StrayQuote,
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "missing ':' between tag and text"),
            Self::UnknownTag(tag) => write!(f, "unknown category tag {tag:?}"),
            Self::UnquotedText => write!(f, "fragment text must be double-quoted"),
            Self::StrayQuote => write!(f, "unescaped double quote in fragment text"),
        }
    }
}

impl std::error::Error for MarkupError {}

// ---------------------------------------------------------------------------
// SpanEncoder
// ---------------------------------------------------------------------------

/// Converts tokens and fragments into [`Span`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEncoder;

impl SpanEncoder {
    pub const fn new() -> Self {
        Self
    }

    /// Span for a token, borrowing its text from `source`.
    ///
    /// Token text is never escaped, so no decoding is needed.
    pub fn encode_token<'a>(&self, source: &'a str, token: &Token) -> Span<'a> {
        Span::new(token.category, token.text(source))
    }

    /// Spans for a token stream, in order.
    pub fn encode_tokens<'a>(&self, source: &'a str, tokens: &[Token]) -> Vec<Span<'a>> {
        tokens
            .iter()
            .map(|token| self.encode_token(source, token))
            .collect()
    }

    /// Decode a fragment into a span.
    ///
    /// The tag is resolved by exact match and unknown tags fall back to
    /// [`Category::Plain`]. The four escape markers are decoded.
    pub fn encode(&self, fragment: &Fragment) -> Span<'static> {
        Span::new(
            self.resolve(fragment.tag()),
            decode(fragment.escaped_text()).into_owned(),
        )
    }

    /// Decode markup leniently. Never fails.
    ///
    /// Lines without a `:` become plain spans holding the whole line. Text
    /// that is not quoted is taken as-is. Empty lines are skipped.
    pub fn decode_markup(&self, markup: &str) -> Vec<Span<'static>> {
        markup
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once(':') {
                Some((tag, rest)) => {
                    let text = unquote(rest).unwrap_or(rest);
                    self.encode(&Fragment::from_parts(tag, text))
                }
                None => Span::plain(decode(line).into_owned()),
            })
            .filter(|span| !span.is_empty())
            .collect()
    }

    fn resolve(&self, tag: &str) -> Category {
        Category::try_from_tag(tag).unwrap_or_else(|| {
            debug!(tag, "unrecognized fragment tag, using plain");
            Category::Plain
        })
    }
}
