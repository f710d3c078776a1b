#![forbid(unsafe_code)]

//! Single-pass Dart tokenizer.
//!
//! The scanner walks the source once, left to right. At each position the
//! matchers are tried in a fixed priority order:
//!
//! 1. block comment (`/* ... */`, non-nested)
//! 2. line comment (`//` to end of line)
//! 3. string literal (single, double, triple-quoted, raw)
//! 4. numeric literal
//! 5. identifier, classified by the [`Grammar`] as keyword, type, constant or plain
//! 6. single punctuation character
//! 7. anything else, merged into one plain run
//!
//! Every match consumes at least one byte and nothing is ever re-scanned, so
//! tokenization is linear in the input length. The output always partitions
//! the source: tokens are ordered, contiguous, non-empty and end on UTF-8
//! boundaries.

use tracing::trace;

use crate::category::Category;
use crate::grammar::{DART, Grammar, GrammarError, is_ident_continue, is_ident_start};
use crate::token::Token;

/// Tokenizer for Dart source driven by a [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DartTokenizer {
    grammar: Grammar,
}

impl Default for DartTokenizer {
    fn default() -> Self {
        Self::new(DART)
    }
}

impl DartTokenizer {
    /// Create a tokenizer for the given grammar without validating it.
    pub const fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    /// Create a tokenizer after checking the grammar.
    pub fn try_new(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        Ok(Self::new(grammar))
    }

    /// The grammar driving this tokenizer.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Tokenize a full source string.
    ///
    /// Never fails: text no matcher recognizes is [`Category::Plain`], and
    /// unterminated strings or comments run to the end of the input.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let (category, end) = self.scan_at(source, pos);
            debug_assert!(end > pos, "scanner must advance");
            push_token(&mut tokens, category, pos..end);
            pos = end;
        }

        tokens
    }

    /// Match the highest-priority construct at `pos`.
    fn scan_at(&self, source: &str, pos: usize) -> (Category, usize) {
        let bytes = source.as_bytes();
        let ch = bytes[pos];

        if let Some(end) = self.scan_block_comment(source, pos) {
            return (Category::Comment, end);
        }

        if let Some(end) = self.scan_line_comment(source, pos) {
            return (Category::Comment, end);
        }

        if let Some(end) = scan_string(bytes, pos) {
            return (Category::String, end);
        }

        if let Some(end) = scan_number(bytes, pos) {
            return (Category::Number, end);
        }

        if is_ident_start(ch) {
            let end = scan_word(bytes, pos);
            return (self.grammar.classify_word(&source[pos..end]), end);
        }

        if self.grammar.is_punctuation(ch) {
            return (Category::Punctuation, pos + 1);
        }

        // Whitespace run
        if ch.is_ascii_whitespace() {
            let mut end = pos + 1;
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            return (Category::Plain, end);
        }

        // Anything else: advance by full UTF-8 character width.
        let char_len = source[pos..].chars().next().map_or(1, char::len_utf8);
        (Category::Plain, pos + char_len)
    }

    fn scan_block_comment(&self, source: &str, pos: usize) -> Option<usize> {
        let open = self.grammar.block_comment_start;
        let close = self.grammar.block_comment_end;
        if open.is_empty() || !source[pos..].starts_with(open) {
            return None;
        }
        let body = pos + open.len();
        match source[body..].find(close) {
            Some(offset) => Some(body + offset + close.len()),
            None => {
                trace!(offset = pos, "block comment runs to end of input");
                Some(source.len())
            }
        }
    }

    fn scan_line_comment(&self, source: &str, pos: usize) -> Option<usize> {
        let marker = self.grammar.line_comment;
        if marker.is_empty() || !source[pos..].starts_with(marker) {
            return None;
        }
        let end = source[pos..]
            .find(|c: char| c == '\n' || c == '\r')
            .map_or(source.len(), |offset| pos + offset);
        Some(end)
    }
}

/// Append a token, merging adjacent plain runs.
fn push_token(tokens: &mut Vec<Token>, category: Category, range: std::ops::Range<usize>) {
    if category == Category::Plain
        && let Some(last) = tokens.last_mut()
        && last.category == Category::Plain
        && last.range.end == range.start
    {
        last.range.end = range.end;
        return;
    }
    tokens.push(Token::new(category, range));
}

/// Scan an identifier starting at `pos`.
fn scan_word(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos + 1;
    while end < bytes.len() && is_ident_continue(bytes[end]) {
        end += 1;
    }
    end
}

/// Scan a string literal starting at `pos`, if one starts there.
///
/// Recognizes `'...'`, `"..."`, `'''...'''`, `"""..."""` and their raw `r`
/// prefixed forms. Backslash escapes are skipped in non-raw strings so an
/// escaped quote never closes the literal.
fn scan_string(bytes: &[u8], pos: usize) -> Option<usize> {
    let (raw, quote_at) = match bytes[pos] {
        b'\'' | b'"' => (false, pos),
        b'r' if matches!(bytes.get(pos + 1), Some(b'\'' | b'"')) => (true, pos + 1),
        _ => return None,
    };
    let quote = bytes[quote_at];
    let triple =
        bytes.get(quote_at + 1) == Some(&quote) && bytes.get(quote_at + 2) == Some(&quote);

    let (end, closed) = if triple {
        scan_triple_quoted(bytes, quote_at + 3, quote, raw)
    } else {
        scan_quoted(bytes, quote_at + 1, quote, raw)
    };
    if !closed {
        trace!(offset = pos, "string literal runs to end of input");
    }
    Some(end)
}

fn scan_quoted(bytes: &[u8], mut end: usize, quote: u8, raw: bool) -> (usize, bool) {
    while end < bytes.len() {
        if !raw && bytes[end] == b'\\' {
            end = (end + 2).min(bytes.len());
        } else if bytes[end] == quote {
            return (end + 1, true);
        } else {
            end += 1;
        }
    }
    (bytes.len(), false)
}

fn scan_triple_quoted(bytes: &[u8], mut end: usize, quote: u8, raw: bool) -> (usize, bool) {
    while end < bytes.len() {
        if !raw && bytes[end] == b'\\' {
            end = (end + 2).min(bytes.len());
        } else if bytes[end] == quote
            && bytes.get(end + 1) == Some(&quote)
            && bytes.get(end + 2) == Some(&quote)
        {
            return (end + 3, true);
        } else {
            end += 1;
        }
    }
    (bytes.len(), false)
}

/// Scan a numeric literal starting at `pos`, if one starts there.
///
/// Accepts `42`, `1_000`, `3.14`, `.5`, `6.02e23`, `1e-9` and `0xFF`. A dot
/// is only part of the number when a digit follows it, so `1.isEven` stays
/// three tokens.
fn scan_number(bytes: &[u8], pos: usize) -> Option<usize> {
    let ch = bytes[pos];
    let leading_dot = ch == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit);
    if !ch.is_ascii_digit() && !leading_dot {
        return None;
    }

    // Hex
    if ch == b'0'
        && matches!(bytes.get(pos + 1), Some(b'x' | b'X'))
        && bytes.get(pos + 2).is_some_and(u8::is_ascii_hexdigit)
    {
        return Some(scan_digits(bytes, pos + 2, u8::is_ascii_hexdigit));
    }

    let mut end = scan_digits(bytes, pos, u8::is_ascii_digit);

    // Fraction
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = scan_digits(bytes, end + 1, u8::is_ascii_digit);
    }

    // Exponent
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut digits = end + 1;
        if matches!(bytes.get(digits), Some(b'+' | b'-')) {
            digits += 1;
        }
        if bytes.get(digits).is_some_and(u8::is_ascii_digit) {
            end = scan_digits(bytes, digits, u8::is_ascii_digit);
        }
    }

    Some(end)
}

/// Scan digits accepted by `is_digit`, allowing `_` separators between digits.
fn scan_digits(bytes: &[u8], start: usize, is_digit: fn(&u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() {
        if is_digit(&bytes[end]) {
            end += 1;
        } else if bytes[end] == b'_' && end > start {
            let mut look = end;
            while look < bytes.len() && bytes[look] == b'_' {
                look += 1;
            }
            if look < bytes.len() && is_digit(&bytes[look]) {
                end = look;
            } else {
                break;
            }
        } else {
            break;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;
    use crate::token::covers_source;

    fn pairs(source: &str) -> Vec<(Category, &str)> {
        let tokens = DartTokenizer::default().tokenize(source);
        assert!(covers_source(source, &tokens), "tokens must partition {source:?}");
        tokens.iter().map(|t| (t.category, t.text(source))).collect()
    }

    fn non_plain(source: &str) -> Vec<(Category, &str)> {
        pairs(source)
            .into_iter()
            .filter(|(category, _)| *category != Category::Plain)
            .collect()
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(DartTokenizer::default().tokenize("").is_empty());
    }

    #[test]
    fn class_declaration() {
        assert_eq!(
            pairs("class Foo {}"),
            vec![
                (Category::Keyword, "class"),
                (Category::Plain, " "),
                (Category::Type, "Foo"),
                (Category::Plain, " "),
                (Category::Punctuation, "{"),
                (Category::Punctuation, "}"),
            ]
        );
    }

    #[test]
    fn assignment_with_number() {
        assert_eq!(
            pairs("x = 42;"),
            vec![
                (Category::Plain, "x "),
                (Category::Punctuation, "="),
                (Category::Plain, " "),
                (Category::Number, "42"),
                (Category::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn comment_marker_inside_string() {
        assert_eq!(pairs("'a // b'"), vec![(Category::String, "'a // b'")]);
        assert_eq!(pairs("\"/* no */\""), vec![(Category::String, "\"/* no */\"")]);
    }

    #[test]
    fn string_marker_inside_comment() {
        assert_eq!(pairs("// it's"), vec![(Category::Comment, "// it's")]);
        assert_eq!(pairs("/* \"x\" */"), vec![(Category::Comment, "/* \"x\" */")]);
    }

    #[test]
    fn escaped_quotes_do_not_terminate() {
        assert_eq!(pairs(r"'it\'s'"), vec![(Category::String, r"'it\'s'")]);
        assert_eq!(pairs(r#""say \"hi\"""#), vec![(Category::String, r#""say \"hi\"""#)]);
    }

    #[test]
    fn escaped_backslash_before_quote_terminates() {
        assert_eq!(
            pairs(r"'a\\' b"),
            vec![(Category::String, r"'a\\'"), (Category::Plain, " b")]
        );
    }

    #[test]
    fn other_quote_kind_does_not_terminate() {
        assert_eq!(pairs(r#"'say "hi"'"#), vec![(Category::String, r#"'say "hi"'"#)]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        assert_eq!(pairs("'abc"), vec![(Category::String, "'abc")]);
        assert_eq!(
            pairs("x = 'abc\nvar y;"),
            vec![
                (Category::Plain, "x "),
                (Category::Punctuation, "="),
                (Category::Plain, " "),
                (Category::String, "'abc\nvar y;"),
            ]
        );
        assert_eq!(pairs("'\\"), vec![(Category::String, "'\\")]);
    }

    #[test]
    fn triple_quoted_string() {
        let source = "'''it's\nmulti'''; x";
        assert_eq!(
            pairs(source),
            vec![
                (Category::String, "'''it's\nmulti'''"),
                (Category::Punctuation, ";"),
                (Category::Plain, " x"),
            ]
        );
    }

    #[test]
    fn empty_string_is_not_triple() {
        assert_eq!(
            pairs("'' + x"),
            vec![
                (Category::String, "''"),
                (Category::Plain, " "),
                (Category::Punctuation, "+"),
                (Category::Plain, " x"),
            ]
        );
    }

    #[test]
    fn raw_string_ignores_escapes() {
        assert_eq!(
            pairs(r"r'C:\' + x"),
            vec![
                (Category::String, r"r'C:\'"),
                (Category::Plain, " "),
                (Category::Punctuation, "+"),
                (Category::Plain, " x"),
            ]
        );
    }

    #[test]
    fn r_inside_word_is_not_raw_prefix() {
        assert_eq!(
            pairs("bar'x'"),
            vec![(Category::Plain, "bar"), (Category::String, "'x'")]
        );
    }

    #[test]
    fn line_comment_stops_before_newline() {
        assert_eq!(
            pairs("// note\nvar"),
            vec![
                (Category::Comment, "// note"),
                (Category::Plain, "\n"),
                (Category::Keyword, "var"),
            ]
        );
        assert_eq!(
            pairs("// note\r\n"),
            vec![(Category::Comment, "// note"), (Category::Plain, "\r\n")]
        );
    }

    #[test]
    fn doc_comment_is_comment() {
        assert_eq!(pairs("/// Docs."), vec![(Category::Comment, "/// Docs.")]);
    }

    #[test]
    fn block_comment_spans_lines_and_does_not_nest() {
        assert_eq!(
            pairs("/* a /* b */ c */"),
            vec![
                (Category::Comment, "/* a /* b */"),
                (Category::Plain, " c "),
                (Category::Punctuation, "*"),
                (Category::Punctuation, "/"),
            ]
        );
        assert_eq!(
            pairs("/* one\ntwo */x"),
            vec![(Category::Comment, "/* one\ntwo */"), (Category::Plain, "x")]
        );
    }

    #[test]
    fn block_comment_cannot_reuse_opening_star() {
        assert_eq!(pairs("/*/ x"), vec![(Category::Comment, "/*/ x")]);
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(pairs("/* open\n'x'"), vec![(Category::Comment, "/* open\n'x'")]);
    }

    #[test]
    fn division_is_punctuation() {
        assert_eq!(non_plain("a / b"), vec![(Category::Punctuation, "/")]);
    }

    #[test]
    fn number_shapes() {
        for literal in [
            "0", "42", "3.14", ".5", "1e10", "1E+3", "6.02e-23", "0xFF", "0XdeadBEEF", "1_000_000",
        ] {
            assert_eq!(pairs(literal), vec![(Category::Number, literal)], "{literal}");
        }
    }

    #[test]
    fn hex_prefix_without_digits() {
        assert_eq!(
            pairs("0x_"),
            vec![(Category::Number, "0"), (Category::Plain, "x_")]
        );
    }

    #[test]
    fn number_does_not_swallow_member_access() {
        assert_eq!(
            pairs("1.isEven"),
            vec![
                (Category::Number, "1"),
                (Category::Punctuation, "."),
                (Category::Plain, "isEven"),
            ]
        );
    }

    #[test]
    fn incomplete_exponent_is_not_consumed() {
        assert_eq!(
            pairs("2e"),
            vec![(Category::Number, "2"), (Category::Plain, "e")]
        );
        assert_eq!(
            pairs("2e+"),
            vec![
                (Category::Number, "2"),
                (Category::Plain, "e"),
                (Category::Punctuation, "+"),
            ]
        );
    }

    #[test]
    fn trailing_separator_is_not_part_of_number() {
        assert_eq!(
            pairs("1__x"),
            vec![(Category::Number, "1"), (Category::Plain, "__x")]
        );
    }

    #[test]
    fn minus_is_punctuation_not_sign() {
        assert_eq!(
            pairs("-1"),
            vec![(Category::Punctuation, "-"), (Category::Number, "1")]
        );
    }

    #[test]
    fn digits_inside_identifiers_stay_plain() {
        assert_eq!(
            pairs("x1 = y2"),
            vec![
                (Category::Plain, "x1 "),
                (Category::Punctuation, "="),
                (Category::Plain, " y2"),
            ]
        );
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert_eq!(pairs("classy iffy"), vec![(Category::Plain, "classy iffy")]);
    }

    #[test]
    fn constants() {
        assert_eq!(
            non_plain("var a = true, b = null, c = MAX_SIZE, d = kPadding;")
                .into_iter()
                .filter(|(category, _)| *category == Category::Constant)
                .map(|(_, text)| text)
                .collect::<Vec<_>>(),
            vec!["true", "null", "MAX_SIZE", "kPadding"]
        );
    }

    #[test]
    fn plain_runs_are_merged() {
        assert_eq!(pairs("foo bar\t baz"), vec![(Category::Plain, "foo bar\t baz")]);
        assert_eq!(pairs("\\ \u{e9}t\u{e9} `"), vec![(Category::Plain, "\\ \u{e9}t\u{e9} `")]);
    }

    #[test]
    fn punctuation_is_one_span_per_character() {
        assert_eq!(
            pairs("=>"),
            vec![(Category::Punctuation, "="), (Category::Punctuation, ">")]
        );
    }

    #[test]
    fn annotations_and_generics() {
        assert_eq!(
            non_plain("@override\nList<int> f() => [];"),
            vec![
                (Category::Punctuation, "@"),
                (Category::Type, "List"),
                (Category::Punctuation, "<"),
                (Category::Type, "int"),
                (Category::Punctuation, ">"),
                (Category::Punctuation, "("),
                (Category::Punctuation, ")"),
                (Category::Punctuation, "="),
                (Category::Punctuation, ">"),
                (Category::Punctuation, "["),
                (Category::Punctuation, "]"),
                (Category::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn unicode_text_keeps_char_boundaries() {
        let source = "var \u{1F600} = '\u{65E5}\u{672C}'; // \u{2713}";
        let tokens = DartTokenizer::default().tokenize(source);
        assert!(covers_source(source, &tokens));
        assert_eq!(tokens[0].category, Category::Keyword);
    }

    #[test]
    fn escape_before_multibyte_char() {
        let source = "'\\\u{e9}' x";
        assert_eq!(
            pairs(source),
            vec![(Category::String, "'\\\u{e9}'"), (Category::Plain, " x")]
        );
    }

    #[test]
    fn custom_grammar_without_comments() {
        let grammar = GrammarBuilder::default()
            .line_comment("")
            .block_comment("", "")
            .build()
            .unwrap();
        let tokenizer = DartTokenizer::try_new(grammar).unwrap();
        let tokens = tokenizer.tokenize("//x");
        let kinds: Vec<_> = tokens.iter().map(|t| t.category).collect();
        assert_eq!(
            kinds,
            vec![Category::Punctuation, Category::Punctuation, Category::Plain]
        );
    }

    #[test]
    fn try_new_rejects_invalid_grammar() {
        let grammar = Grammar {
            punctuation: "a",
            ..DART
        };
        assert_eq!(
            DartTokenizer::try_new(grammar),
            Err(GrammarError::InvalidPunctuation('a'))
        );
    }

    #[test]
    fn adversarial_inputs_partition() {
        let inputs = [
            "/*".repeat(500),
            "*/".repeat(500),
            "'".repeat(501),
            "\\".repeat(500),
            "\"\"\"".repeat(100),
            "_".repeat(1000),
            "1_".repeat(500),
            ";".repeat(1000),
        ];
        for source in &inputs {
            let tokens = DartTokenizer::default().tokenize(source);
            assert!(covers_source(source, &tokens));
        }
    }
}
