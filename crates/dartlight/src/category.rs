#![forbid(unsafe_code)]

//! Lexical categories assigned to highlighted fragments.

use std::fmt;

/// Lexical class of a highlighted fragment.
///
/// The set is closed: every byte of the input belongs to exactly one span and
/// every span carries exactly one category. Presentation layers map each
/// variant to a visual style.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Whitespace, ordinary identifiers and anything unrecognized.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "plain"))]
    Plain,
    /// Reserved and contextual Dart keywords.
    #[cfg_attr(feature = "serde", serde(rename = "keyword"))]
    Keyword,
    /// Class-like names and built-in type names (`int`, `String`, `Widget`).
    #[cfg_attr(feature = "serde", serde(rename = "identifier-type"))]
    Type,
    /// Line and block comments, including doc comments.
    #[cfg_attr(feature = "serde", serde(rename = "comment"))]
    Comment,
    /// String literals, quotes included.
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    String,
    /// Numeric literals.
    #[cfg_attr(feature = "serde", serde(rename = "number"))]
    Number,
    /// Single operator or delimiter characters.
    #[cfg_attr(feature = "serde", serde(rename = "punctuation"))]
    Punctuation,
    /// `true`, `false`, `null` and constant-shaped names.
    #[cfg_attr(feature = "serde", serde(rename = "constant"))]
    Constant,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Plain,
        Self::Keyword,
        Self::Type,
        Self::Comment,
        Self::String,
        Self::Number,
        Self::Punctuation,
        Self::Constant,
    ];

    /// Stable textual tag used by the fragment interchange format.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Keyword => "keyword",
            Self::Type => "identifier-type",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Punctuation => "punctuation",
            Self::Constant => "constant",
        }
    }

    /// Resolve a tag by exact match. Returns `None` for unknown tags.
    #[must_use]
    pub fn try_from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }

    /// Resolve a tag by exact match, falling back to [`Category::Plain`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::try_from_tag(tag).unwrap_or_default()
    }

    /// Whether this category is rendered without any style.
    pub fn is_plain(self) -> bool {
        matches!(self, Self::Plain)
    }

    /// Whether this category is a literal value (string, number or constant).
    pub fn is_literal(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Constant)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
