//! Tokenizer capability and its two implementations.
//!
//! A [`Tokenizer`] answers one question: does a token of mine start at the
//! beginning of this text, and if so, how long is it and what does it carry?
//! The scanner composes tokenizers in priority order and takes the first
//! answer.

use crate::nfa::PrefixRecognizer;
use crate::token::{TokenKind, TokenValue};
use crate::trie::Trie;
use ahash::RandomState;
use compact_str::CompactString;
use hashbrown::HashMap;
use std::sync::Arc;

/// A successful match at the start of a text: the token kind, the matched
/// length (characters and bytes), and the extracted payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerMatch<K> {
    pub kind: K,
    pub chars: usize,
    pub bytes: usize,
    pub value: TokenValue,
}

/// Something that can claim a token at the start of a text.
///
/// Implementations hold no per-match state; the whole result of a match
/// attempt is the returned value, so one tokenizer may serve any number of
/// callers.
pub trait Tokenizer<K: TokenKind>: Send + Sync {
    fn try_match(&self, text: &str) -> Option<TokenizerMatch<K>>;
}

/// A pure function from matched literal text to its payload, invoked
/// exactly once per successful match and never on rejected candidates.
pub type Extractor = Arc<dyn Fn(&str) -> TokenValue + Send + Sync>;

/// Whether a keyword match must be followed by a delimiter to count.
///
/// `Required` keeps word-like keywords from matching as a prefix of a
/// longer identifier; `Ignored` suits punctuation, which may butt up
/// against anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    Required,
    Ignored,
}

/// Per-word configuration for the keyword tokenizer.
#[derive(Clone)]
pub struct WordEntry<K> {
    pub kind: K,
    pub boundary: BoundaryPolicy,
    pub extractor: Option<Extractor>,
}

impl<K> WordEntry<K> {
    #[must_use]
    pub fn new(kind: K, boundary: BoundaryPolicy) -> Self {
        Self {
            kind,
            boundary,
            extractor: None,
        }
    }

    #[must_use]
    pub fn with_extractor(
        kind: K,
        boundary: BoundaryPolicy,
        extractor: impl Fn(&str) -> TokenValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            boundary,
            extractor: Some(Arc::new(extractor)),
        }
    }
}

/// Characters that may legally follow a boundary-`Required` keyword:
/// whitespace or a structural delimiter.
fn is_boundary(c: char) -> bool {
    matches!(c, ' ' | '\n' | '(' | ')' | '{' | '}')
}

/// Trie-backed tokenizer for keywords and punctuation.
///
/// Looks up the longest stored word prefixing the text, then applies the
/// word's boundary policy: the match stands when it ends the text, when the
/// policy is [`BoundaryPolicy::Ignored`], or when the next character is a
/// boundary character. `"iffy"` therefore never yields the keyword `if`,
/// while `"if("` does.
pub struct KeywordTokenizer<K> {
    trie: Trie,
    entries: HashMap<CompactString, WordEntry<K>, RandomState>,
}

impl<K: TokenKind> KeywordTokenizer<K> {
    #[must_use]
    pub fn new<'a>(words: impl IntoIterator<Item = (&'a str, WordEntry<K>)>) -> Self {
        let entries: HashMap<CompactString, WordEntry<K>, RandomState> = words
            .into_iter()
            .map(|(word, entry)| (CompactString::new(word), entry))
            .collect();
        let trie = Trie::from_words(entries.keys());
        Self { trie, entries }
    }
}

impl<K: TokenKind> Tokenizer<K> for KeywordTokenizer<K> {
    fn try_match(&self, text: &str) -> Option<TokenizerMatch<K>> {
        let m = self.trie.longest_match(text)?;
        let word = &text[..m.bytes];
        let entry = self.entries.get(word)?;

        let at_end = m.bytes == text.len();
        let boundary_ok = at_end
            || entry.boundary == BoundaryPolicy::Ignored
            || text[m.bytes..].chars().next().is_some_and(is_boundary);
        if !boundary_ok {
            return None;
        }

        let value = entry
            .extractor
            .as_ref()
            .map_or(TokenValue::None, |extract| extract(word));
        Some(TokenizerMatch {
            kind: entry.kind,
            chars: m.chars,
            bytes: m.bytes,
            value,
        })
    }
}

/// Adapts a [`PrefixRecognizer`] into a tokenizer producing a fixed kind
/// plus an extracted payload.
pub struct RecognizerTokenizer<K> {
    recognizer: Arc<dyn PrefixRecognizer>,
    kind: K,
    extractor: Option<Extractor>,
}

impl<K: TokenKind> RecognizerTokenizer<K> {
    #[must_use]
    pub fn new(recognizer: impl PrefixRecognizer + 'static, kind: K) -> Self {
        Self {
            recognizer: Arc::new(recognizer),
            kind,
            extractor: None,
        }
    }

    #[must_use]
    pub fn with_extractor(
        recognizer: impl PrefixRecognizer + 'static,
        kind: K,
        extractor: impl Fn(&str) -> TokenValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            recognizer: Arc::new(recognizer),
            kind,
            extractor: Some(Arc::new(extractor)),
        }
    }
}

impl<K: TokenKind> Tokenizer<K> for RecognizerTokenizer<K> {
    fn try_match(&self, text: &str) -> Option<TokenizerMatch<K>> {
        let r = self.recognizer.recognize(text);
        if !r.matched || r.chars == 0 {
            return None;
        }
        let value = self
            .extractor
            .as_ref()
            .map_or(TokenValue::None, |extract| extract(&text[..r.bytes]));
        Some(TokenizerMatch {
            kind: self.kind,
            chars: r.chars,
            bytes: r.bytes,
            value,
        })
    }
}
