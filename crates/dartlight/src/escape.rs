#![forbid(unsafe_code)]

//! Reversible escape markers for fragment text.
//!
//! Fragment text is stored with line feeds, tabs and both quote characters
//! replaced by private-use code points, so a fragment always fits on one
//! line and between a pair of double quotes. Exactly these four substitutions
//! exist; every other character passes through untouched.
//!
//! Text that already contains one of the marker code points does not survive
//! an escape/decode round trip. The highlight path slices span text directly
//! from the source and never goes through these functions.

use std::borrow::Cow;

/// Stands in for `'\n'`.
pub const LINE_FEED_MARKER: char = '\u{E000}';
/// Stands in for `'\t'`.
pub const TAB_MARKER: char = '\u{E001}';
/// Stands in for `'\''`.
pub const APOSTROPHE_MARKER: char = '\u{E002}';
/// Stands in for `'"'`.
pub const QUOTE_MARKER: char = '\u{E003}';

fn escape_char(ch: char) -> char {
    match ch {
        '\n' => LINE_FEED_MARKER,
        '\t' => TAB_MARKER,
        '\'' => APOSTROPHE_MARKER,
        '"' => QUOTE_MARKER,
        other => other,
    }
}

fn decode_char(ch: char) -> char {
    match ch {
        LINE_FEED_MARKER => '\n',
        TAB_MARKER => '\t',
        APOSTROPHE_MARKER => '\'',
        QUOTE_MARKER => '"',
        other => other,
    }
}

/// Replace line feeds, tabs and quotes with their markers.
///
/// Borrows when there is nothing to replace.
pub fn escape(text: &str) -> Cow<'_, str> {
    map_chars(text, |ch| matches!(ch, '\n' | '\t' | '\'' | '"'), escape_char)
}

/// Reverse [`escape`]. Total: characters that are not markers pass through.
pub fn decode(text: &str) -> Cow<'_, str> {
    map_chars(text, contains_marker_char, decode_char)
}

/// Whether `text` contains any marker code point.
pub fn contains_marker(text: &str) -> bool {
    text.contains(contains_marker_char)
}

fn contains_marker_char(ch: char) -> bool {
    matches!(
        ch,
        LINE_FEED_MARKER | TAB_MARKER | APOSTROPHE_MARKER | QUOTE_MARKER
    )
}

fn map_chars(text: &str, needs_change: fn(char) -> bool, map: fn(char) -> char) -> Cow<'_, str> {
    let Some(first) = text.find(needs_change) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    out.extend(text[first..].chars().map(map));
    Cow::Owned(out)
}
