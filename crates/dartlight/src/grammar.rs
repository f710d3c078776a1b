#![forbid(unsafe_code)]

//! Grammar tables for Dart highlighting.
//!
//! A [`Grammar`] is plain `'static` data: keyword, type and constant word
//! lists, the punctuation alphabet and comment delimiters. [`DART`] is the
//! built-in table. Variants are derived with [`GrammarBuilder`] and checked by
//! [`Grammar::validate`]; a grammar that fails validation is a programming
//! error, not a runtime condition.

use std::fmt;

use crate::category::Category;

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

const DART_KEYWORDS: &[&str] = &[
    "abstract",
    "as",
    "assert",
    "async",
    "await",
    "base",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "covariant",
    "default",
    "deferred",
    "do",
    "dynamic",
    "else",
    "enum",
    "export",
    "extends",
    "extension",
    "external",
    "factory",
    "final",
    "finally",
    "for",
    "Function",
    "get",
    "hide",
    "if",
    "implements",
    "import",
    "in",
    "interface",
    "is",
    "late",
    "library",
    "mixin",
    "new",
    "on",
    "operator",
    "part",
    "required",
    "rethrow",
    "return",
    "sealed",
    "set",
    "show",
    "static",
    "super",
    "switch",
    "sync",
    "this",
    "throw",
    "try",
    "typedef",
    "var",
    "void",
    "when",
    "while",
    "with",
    "yield",
];

const DART_BUILTIN_TYPES: &[&str] = &[
    "int",
    "double",
    "num",
    "bool",
    "BigInt",
    "Comparable",
    "DateTime",
    "Duration",
    "Enum",
    "Error",
    "Exception",
    "Future",
    "FutureOr",
    "Iterable",
    "Iterator",
    "List",
    "Map",
    "Never",
    "Null",
    "Object",
    "Pattern",
    "Record",
    "RegExp",
    "Set",
    "Stream",
    "String",
    "StringBuffer",
    "Symbol",
    "Type",
    "Uri",
];

const DART_CONSTANTS: &[&str] = &["true", "false", "null"];

const DART_PUNCTUATION: &str = "(){}[];,.:?!=<>+-*/%&|^~@#";

/// Dart grammar table.
pub const DART: Grammar = Grammar {
    name: "Dart",
    keywords: DART_KEYWORDS,
    builtin_types: DART_BUILTIN_TYPES,
    constants: DART_CONSTANTS,
    punctuation: DART_PUNCTUATION,
    line_comment: "//",
    block_comment_start: "/*",
    block_comment_end: "*/",
    flutter_constants: true,
};

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// Word lists and delimiters driving the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    pub name: &'static str,
    /// Words classified as [`Category::Keyword`].
    pub keywords: &'static [&'static str],
    /// Type names classified as [`Category::Type`] regardless of shape.
    pub builtin_types: &'static [&'static str],
    /// Words classified as [`Category::Constant`] regardless of shape.
    pub constants: &'static [&'static str],
    /// ASCII characters emitted one per span as [`Category::Punctuation`].
    pub punctuation: &'static str,
    /// Line comment marker. Empty disables line comments.
    pub line_comment: &'static str,
    /// Block comment opener. Empty (together with the closer) disables block comments.
    pub block_comment_start: &'static str,
    pub block_comment_end: &'static str,
    /// Treat `kName` identifiers as constants (Flutter naming convention).
    pub flutter_constants: bool,
}

impl Default for Grammar {
    fn default() -> Self {
        DART
    }
}

impl Grammar {
    /// Classify a complete identifier.
    ///
    /// Keywords win over types, types over constants; anything else is plain.
    pub fn classify_word(&self, word: &str) -> Category {
        if self.keywords.contains(&word) {
            Category::Keyword
        } else if self.builtin_types.contains(&word) || is_class_shaped(word) {
            Category::Type
        } else if self.constants.contains(&word)
            || is_constant_shaped(word)
            || (self.flutter_constants && is_flutter_constant(word))
        {
            Category::Constant
        } else {
            Category::Plain
        }
    }

    /// Whether `byte` is a punctuation character.
    #[inline]
    pub fn is_punctuation(&self, byte: u8) -> bool {
        self.punctuation.as_bytes().contains(&byte)
    }

    /// Check the tables for misconfiguration.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (table, words) in [
            ("keywords", self.keywords),
            ("builtin_types", self.builtin_types),
            ("constants", self.constants),
        ] {
            for (index, word) in words.iter().enumerate() {
                if !is_identifier(word) {
                    return Err(GrammarError::InvalidWord {
                        table,
                        word: (*word).to_string(),
                    });
                }
                if words[..index].contains(word) {
                    return Err(GrammarError::DuplicateWord {
                        table,
                        word: (*word).to_string(),
                    });
                }
            }
        }

        for (index, ch) in self.punctuation.char_indices() {
            let reserved = !ch.is_ascii()
                || ch.is_ascii_alphanumeric()
                || ch.is_ascii_whitespace()
                || matches!(ch, '_' | '$' | '\'' | '"' | '\\');
            if reserved {
                return Err(GrammarError::InvalidPunctuation(ch));
            }
            if self.punctuation[..index].contains(ch) {
                return Err(GrammarError::InvalidPunctuation(ch));
            }
        }

        if self.block_comment_start.is_empty() != self.block_comment_end.is_empty() {
            return Err(GrammarError::UnbalancedBlockComment);
        }
        for delimiter in [
            self.line_comment,
            self.block_comment_start,
            self.block_comment_end,
        ] {
            if !delimiter.is_ascii() || delimiter.contains(char::is_whitespace) {
                return Err(GrammarError::InvalidCommentDelimiter(delimiter.to_string()));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Identifier shapes
// ---------------------------------------------------------------------------

/// First byte of a Dart identifier.
#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

/// Continuation byte of a Dart identifier.
#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_identifier(word: &str) -> bool {
    let bytes = word.as_bytes();
    !bytes.is_empty() && is_ident_start(bytes[0]) && bytes[1..].iter().all(|&b| is_ident_continue(b))
}

/// Strip Dart's library-private `_` and the `$` sigil.
fn strip_sigils(word: &str) -> &str {
    word.trim_start_matches(|c| c == '_' || c == '$')
}

/// `Widget`, `_HomeState`, `T`.
fn is_class_shaped(word: &str) -> bool {
    let body = strip_sigils(word);
    let Some(first) = body.bytes().next() else {
        return false;
    };
    first.is_ascii_uppercase() && (body.len() == 1 || body.bytes().any(|b| b.is_ascii_lowercase()))
}

/// `MAX_SIZE`, `_DEFAULT_PORT`.
fn is_constant_shaped(word: &str) -> bool {
    let body = strip_sigils(word);
    let bytes = body.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_uppercase()
        && bytes
            .iter()
            .all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// `kPadding`, `kIsWeb`.
fn is_flutter_constant(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() >= 2 && bytes[0] == b'k' && bytes[1].is_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for deriving a [`Grammar`] from an existing one.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::from_grammar(DART)
    }
}

impl GrammarBuilder {
    /// Start from an existing grammar.
    #[must_use]
    pub const fn from_grammar(grammar: Grammar) -> Self {
        Self { grammar }
    }

    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.grammar.name = name;
        self
    }

    #[must_use]
    pub const fn keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.grammar.keywords = keywords;
        self
    }

    #[must_use]
    pub const fn builtin_types(mut self, types: &'static [&'static str]) -> Self {
        self.grammar.builtin_types = types;
        self
    }

    #[must_use]
    pub const fn constants(mut self, constants: &'static [&'static str]) -> Self {
        self.grammar.constants = constants;
        self
    }

    #[must_use]
    pub const fn punctuation(mut self, punctuation: &'static str) -> Self {
        self.grammar.punctuation = punctuation;
        self
    }

    #[must_use]
    pub const fn line_comment(mut self, marker: &'static str) -> Self {
        self.grammar.line_comment = marker;
        self
    }

    #[must_use]
    pub const fn block_comment(mut self, start: &'static str, end: &'static str) -> Self {
        self.grammar.block_comment_start = start;
        self.grammar.block_comment_end = end;
        self
    }

    #[must_use]
    pub const fn flutter_constants(mut self, enabled: bool) -> Self {
        self.grammar.flutter_constants = enabled;
        self
    }

    /// Validate and return the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        self.grammar.validate()?;
        Ok(self.grammar)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Grammar misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A word list entry is not a Dart identifier.
    InvalidWord { table: &'static str, word: String },
    /// A word appears twice in the same list.
    DuplicateWord { table: &'static str, word: String },
    /// A punctuation character collides with identifiers, digits, quotes or
    /// whitespace, or is repeated.
    InvalidPunctuation(char),
    /// Only one of the block comment delimiters is set.
    UnbalancedBlockComment,
    /// A comment delimiter is non-ASCII or contains whitespace.
    InvalidCommentDelimiter(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWord { table, word } => {
                write!(f, "{table}: {word:?} is not an identifier")
            }
            Self::DuplicateWord { table, word } => write!(f, "{table}: duplicate entry {word:?}"),
            Self::InvalidPunctuation(ch) => write!(f, "invalid punctuation character {ch:?}"),
            Self::UnbalancedBlockComment => {
                write!(f, "block comment needs both a start and an end delimiter")
            }
            Self::InvalidCommentDelimiter(delimiter) => {
                write!(f, "invalid comment delimiter {delimiter:?}")
            }
        }
    }
}

impl std::error::Error for GrammarError {}
