#![forbid(unsafe_code)]

//! Dart syntax highlighting engine.
//!
//! This crate scans Dart source once, left to right, and classifies every
//! byte into a [`Category`]. The output is a gap-free, non-overlapping
//! sequence of [`Span`]s whose texts concatenate back to the input exactly.
//! Styling, layout and clipboard handling belong to the presentation layer
//! on top.
//!
//! - [`highlight()`] - the one-call entry point
//! - [`Highlighter`] - reusable engine bound to a [`Grammar`]
//! - [`DartTokenizer`] - byte-range [`Token`]s without text
//! - [`SpanEncoder`] / [`Fragment`] - escaped interchange form and decoding
//!
//! # Example
//! ```
//! use dartlight::{Category, highlight, split_lines};
//!
//! let spans = highlight("final x = 'a // b'; // note\nx;");
//! let strings: Vec<_> = spans
//!     .iter()
//!     .filter(|span| span.category == Category::String)
//!     .map(|span| span.as_str())
//!     .collect();
//! assert_eq!(strings, ["'a // b'"]);
//!
//! // One vector of spans per source line, for line-oriented renderers.
//! assert_eq!(split_lines(&spans).len(), 2);
//! ```
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for [`Category`], [`Token`] and [`Span`] |

pub mod category;
pub mod encoder;
pub mod escape;
pub mod grammar;
pub mod highlight;
pub mod span;
pub mod token;
pub mod tokenizer;

pub use category::Category;
pub use encoder::{Fragment, MarkupError, SpanEncoder, to_markup};
pub use grammar::{DART, Grammar, GrammarBuilder, GrammarError};
pub use highlight::{Highlighter, highlight};
pub use span::{Span, plain_text, split_lines};
pub use token::{Token, covers_source, validate_tokens};
pub use tokenizer::DartTokenizer;
