//! # Strigil
//!
//! Hand-built lexical analysis: a trie word recognizer, an NFA engine, and
//! a DPDA engine, composed into a scanner that tokenizes source text for a
//! small language.
//!
//! ## Overview
//!
//! The three automata are independent engines with immutable, validated
//! definitions:
//!
//! - **Trie** ([`trie::Trie`]): longest-matched-prefix lookup over a finite
//!   word set.
//! - **NFA** ([`nfa::Nfa`]): concurrent active-state simulation with
//!   explicit, class, and wildcard transitions, used as a *prefix*
//!   recognizer — it reports the best accepted prefix instead of failing on
//!   longer input.
//! - **DPDA** ([`dpda::Dpda`]): stack automaton with epsilon moves and
//!   transitions that can delegate input consumption to an embedded
//!   recognizer, for nested and balanced structure.
//!
//! The scanner composes tokenizers built on these engines in priority
//! order and emits positioned tokens.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use strigil::recognizer::{IdentifierRecognizer, NumberRecognizer};
//! use strigil::scanner::Scanner;
//! use strigil::token::TokenValue;
//! use strigil::tokenizer::{BoundaryPolicy, KeywordTokenizer, RecognizerTokenizer, WordEntry};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     If,
//!     Assign,
//!     Identifier,
//!     Value,
//! }
//!
//! let scanner = Scanner::new(vec![
//!     // Most specific first: keywords and punctuation beat identifiers.
//!     Box::new(KeywordTokenizer::new([
//!         ("if", WordEntry::new(Kind::If, BoundaryPolicy::Required)),
//!         (":=", WordEntry::new(Kind::Assign, BoundaryPolicy::Ignored)),
//!     ])),
//!     Box::new(RecognizerTokenizer::with_extractor(
//!         NumberRecognizer::new(),
//!         Kind::Value,
//!         |text| TokenValue::Integer(text.parse().unwrap_or_default()),
//!     )),
//!     Box::new(RecognizerTokenizer::new(
//!         IdentifierRecognizer::new(),
//!         Kind::Identifier,
//!     )),
//! ]);
//!
//! let tokens = scanner.scan("a:=1").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].value, TokenValue::Integer(1));
//! ```
//!
//! ## Modules
//!
//! - [`charset`] - shared character-class tables
//! - [`trie`] - trie word recognizer
//! - [`nfa`] - NFA engine and the [`nfa::PrefixRecognizer`] contract
//! - [`recognizer`] - string/identifier/number NFA instances
//! - [`dpda`] - DPDA engine, bracket and arithmetic-group instances
//! - [`token`] - positioned tokens and payloads
//! - [`tokenizer`] - the tokenizer capability and its implementations
//! - [`scanner`] - the composed scanner
//! - [`error`] - construction-time and scan errors

pub mod charset;
pub mod dpda;
pub mod error;
pub mod nfa;
pub mod recognizer;
pub mod scanner;
pub mod token;
pub mod tokenizer;
pub mod trie;

pub use charset::CharSet;
pub use dpda::{Action, BracketRecognizer, Dpda, DpdaBuilder, GroupRecognizer};
pub use error::{AutomatonError, ScanError};
pub use nfa::{Nfa, NfaBuilder, PrefixRecognizer, Recognition, StateId};
pub use recognizer::{IdentifierRecognizer, NumberRecognizer, StringRecognizer};
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind, TokenValue};
pub use tokenizer::{
    BoundaryPolicy, Extractor, KeywordTokenizer, RecognizerTokenizer, Tokenizer, TokenizerMatch,
    WordEntry,
};
pub use trie::{Trie, TrieMatch};
