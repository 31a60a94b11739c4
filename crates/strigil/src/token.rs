//! Positioned token records produced by the scanner.

use compact_str::CompactString;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Marker bounds for token-kind types.
///
/// Any `Copy` equality-comparable type works; languages typically use a
/// fieldless enum. Implemented automatically.
pub trait TokenKind: Copy + PartialEq + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> TokenKind for T where T: Copy + PartialEq + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A token's position in source text. Lines and columns are 1-based and
/// count characters; `end` is inclusive, so a one-character token has
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Span {
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(line: u32, start: u32, end: u32) -> Self {
        Self { line, start, end }
    }

    /// Width in characters.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.end - self.start + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start, self.end)
    }
}

/// The parsed payload of a token, if any.
///
/// Payload shapes form a closed set chosen per token kind at scanner
/// construction time; extractor functions map matched text into one of
/// these variants.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub enum TokenValue {
    /// No payload (keywords, punctuation).
    #[default]
    None,
    /// Parsed integer literal.
    Integer(i64),
    /// Parsed decimal literal.
    Float(f64),
    /// String literal text.
    String(CompactString),
    /// Boolean literal.
    Bool(bool),
    /// A named sub-kind, e.g. which comparison or operator a token is.
    Symbol(&'static str),
}

impl TokenValue {
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A token emitted by the scanner: kind, source text, position, and an
/// optional payload. Immutable once emitted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(bound = "K: Serialize"))]
pub struct Token<K: TokenKind> {
    pub kind: K,
    pub text: CompactString,
    pub span: Span,
    pub value: TokenValue,
}

impl<K: TokenKind> Token<K> {
    #[must_use]
    pub fn new(kind: K, text: impl Into<CompactString>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            value: TokenValue::None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self
    }
}
