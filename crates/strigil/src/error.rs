//! Error types for construction-time validation and scanning.
//!
//! Expected negative outcomes during matching (a recognizer that does not
//! apply at the cursor) are ordinary `Option`/`bool` results consumed by the
//! scanner's fallback loop; only malformed construction-time tables and a
//! total failure to match at a position surface as errors.

use crate::nfa::StateId;
use crate::token::{Token, TokenKind};
use thiserror::Error;

/// A constructed transition table is malformed. Raised by the automaton
/// builders' `build()` so failures are fatal at startup, never mid-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("transition references undefined state {0:?}")]
    UndefinedState(StateId),

    #[error("start state {0:?} was never allocated")]
    UndefinedStart(StateId),

    #[error("accept state {0:?} was never allocated")]
    UndefinedAccept(StateId),

    #[error("no start state was set")]
    MissingStart,

    #[error("transition symbol {0:?} is outside the input alphabet")]
    SymbolOutsideAlphabet(char),

    #[error("stack symbol {0:?} is outside the stack alphabet")]
    StackSymbolOutsideAlphabet(char),

    #[error("epsilon transition at state {0:?} carries an embedded recognizer")]
    DelegateOnEpsilon(StateId),
}

/// No tokenizer accepted the input at the current cursor.
///
/// Carries the unrecognized remainder, its position, and the tokens scanned
/// before the failure.
#[derive(Debug, Clone, Error)]
#[error("unexpected text '{}' at line {line} column {column}", preview(.remainder))]
pub struct ScanError<K: TokenKind> {
    /// Everything from the failing position to the end of input.
    pub remainder: String,
    /// 1-based line of the failing position.
    pub line: u32,
    /// 1-based column of the failing position.
    pub column: u32,
    /// Tokens successfully scanned before the failure.
    pub scanned: Vec<Token<K>>,
}

fn preview(text: &str) -> String {
    if text.chars().count() < 15 {
        text.to_string()
    } else {
        let head: String = text.chars().take(14).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Word,
    }

    #[test]
    fn test_scan_error_display_short_remainder() {
        let err: ScanError<TestKind> = ScanError {
            remainder: "@@@".to_string(),
            line: 1,
            column: 1,
            scanned: Vec::new(),
        };
        assert_eq!(err.to_string(), "unexpected text '@@@' at line 1 column 1");
    }

    #[test]
    fn test_scan_error_display_ellipsizes_long_remainder() {
        let err: ScanError<TestKind> = ScanError {
            remainder: "abcdefghijklmnopqrstuvwxyz".to_string(),
            line: 3,
            column: 7,
            scanned: vec![Token::new(TestKind::Word, "x", Span::new(1, 1, 1))],
        };
        assert_eq!(
            err.to_string(),
            "unexpected text 'abcdefghijklmn...' at line 3 column 7"
        );
    }

    #[test]
    fn test_automaton_error_display() {
        let err = AutomatonError::UndefinedState(StateId(7));
        assert_eq!(err.to_string(), "transition references undefined state StateId(7)");
    }
}
