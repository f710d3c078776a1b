#![forbid(unsafe_code)]

//! Classified text spans handed to presentation layers.

use std::borrow::Cow;

use crate::category::Category;

/// A classified piece of source text.
///
/// Spans produced by [`highlight()`](crate::highlight()) borrow from the source;
/// spans decoded from fragments own their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span<'a> {
    pub category: Category,
    pub text: Cow<'a, str>,
}

impl<'a> Span<'a> {
    /// Create a span.
    #[inline]
    #[must_use]
    pub fn new(category: Category, text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// Create a plain span.
    #[inline]
    #[must_use]
    pub fn plain(text: impl Into<Cow<'a, str>>) -> Self {
        Self::new(Category::Plain, text)
    }

    /// The span text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Detach the span from the source it borrows.
    #[must_use]
    pub fn into_owned(self) -> Span<'static> {
        Span {
            category: self.category,
            text: Cow::Owned(self.text.into_owned()),
        }
    }
}

/// Concatenate span texts in order.
pub fn plain_text(spans: &[Span<'_>]) -> String {
    let mut out = String::with_capacity(spans.iter().map(Span::len).sum());
    for span in spans {
        out.push_str(&span.text);
    }
    out
}

/// Split a span stream into lines at `'\n'`.
///
/// Spans crossing a line break (block comments, multi-line strings) are cut
/// into one piece per line, each keeping the original category. Line feeds
/// are dropped and empty pieces skipped. Like `str::split('\n')`, `n` line
/// feeds yield `n + 1` lines, so an empty stream yields one empty line.
pub fn split_lines<'a>(spans: &[Span<'a>]) -> Vec<Vec<Span<'a>>> {
    let mut lines = vec![Vec::new()];
    for span in spans {
        let pieces = split_cow(&span.text);
        let last = pieces.len() - 1;
        for (index, piece) in pieces.into_iter().enumerate() {
            if !piece.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.push(Span::new(span.category, piece));
            }
            if index < last {
                lines.push(Vec::new());
            }
        }
    }
    lines
}

fn split_cow<'a>(text: &Cow<'a, str>) -> Vec<Cow<'a, str>> {
    match text {
        Cow::Borrowed(s) => s.split('\n').map(Cow::Borrowed).collect(),
        Cow::Owned(s) => s.split('\n').map(|piece| Cow::Owned(piece.to_string())).collect(),
    }
}
