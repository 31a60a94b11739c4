//! The scanner: priority-ordered tokenizers over a source text.

use crate::error::ScanError;
use crate::token::{Span, Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// Tokenizes source text by trying an ordered list of tokenizers at each
/// position.
///
/// Order is load-bearing: the first tokenizer to match wins and there is no
/// backtracking across tokenizers, so the most specific ones (keywords and
/// punctuation) must come before generic value and identifier recognizers —
/// that is what makes `if` a keyword rather than an identifier.
///
/// # Example
///
/// ```rust,no_run
/// use strigil::recognizer::IdentifierRecognizer;
/// use strigil::scanner::Scanner;
/// use strigil::tokenizer::{BoundaryPolicy, KeywordTokenizer, RecognizerTokenizer, WordEntry};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind {
///     If,
///     Identifier,
/// }
///
/// let scanner = Scanner::new(vec![
///     Box::new(KeywordTokenizer::new([(
///         "if",
///         WordEntry::new(Kind::If, BoundaryPolicy::Required),
///     )])),
///     Box::new(RecognizerTokenizer::new(
///         IdentifierRecognizer::new(),
///         Kind::Identifier,
///     )),
/// ]);
///
/// let tokens = scanner.scan("if iffy").unwrap();
/// assert_eq!(tokens[0].kind, Kind::If);
/// assert_eq!(tokens[1].kind, Kind::Identifier);
/// ```
pub struct Scanner<K: TokenKind> {
    tokenizers: Vec<Box<dyn Tokenizer<K>>>,
}

impl<K: TokenKind> Scanner<K> {
    /// Build a scanner from tokenizers in priority order, most specific
    /// first.
    #[must_use]
    pub fn new(tokenizers: Vec<Box<dyn Tokenizer<K>>>) -> Self {
        Self { tokenizers }
    }

    /// Scan a whole source text into tokens.
    ///
    /// Whitespace between tokens is skipped: a space advances the column,
    /// a newline resets the column to 1 and advances the line. Each emitted
    /// token spans `start..=end` columns on its line, end inclusive.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when no tokenizer accepts at some position,
    /// carrying the unrecognized remainder, its line and column, and the
    /// tokens scanned up to that point.
    pub fn scan(&self, text: &str) -> Result<Vec<Token<K>>, ScanError<K>> {
        let mut tokens = Vec::new();
        let mut rest = text;
        let mut line: u32 = 1;
        let mut column: u32 = 1;

        'scan: while let Some(c) = rest.chars().next() {
            if c == ' ' {
                column += 1;
                rest = &rest[1..];
                continue;
            }
            if c == '\n' {
                line += 1;
                column = 1;
                rest = &rest[1..];
                continue;
            }

            for tokenizer in &self.tokenizers {
                if let Some(m) = tokenizer.try_match(rest) {
                    let span = Span::new(line, column, column + m.chars as u32 - 1);
                    log::trace!("scanner: {:?} {:?} at {span}", m.kind, &rest[..m.bytes]);
                    tokens.push(Token {
                        kind: m.kind,
                        text: rest[..m.bytes].into(),
                        span,
                        value: m.value,
                    });
                    column += m.chars as u32;
                    rest = &rest[m.bytes..];
                    continue 'scan;
                }
            }

            return Err(ScanError {
                remainder: rest.to_string(),
                line,
                column,
                scanned: tokens,
            });
        }

        Ok(tokens)
    }
}
