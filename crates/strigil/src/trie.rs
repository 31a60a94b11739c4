//! Trie-based word recognizer with longest-matched-prefix lookup.

use ahash::RandomState;
use hashbrown::HashMap;

/// A successful prefix lookup: how much of the queried text is covered by
/// the longest stored word that prefixes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieMatch {
    /// Matched length in characters.
    pub chars: usize,
    /// Matched length in bytes (UTF-8).
    pub bytes: usize,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode, RandomState>,
    terminal: bool,
}

/// A tree of single-character edges sharing common prefixes.
///
/// Built once from a finite word set, then queried read-only. Each edge is
/// unique, so lookups are deterministic and need no backtracking: the walk
/// remembers the most recent terminal node and stops at the first character
/// without an edge.
///
/// # Example
///
/// ```rust
/// use strigil::trie::Trie;
///
/// let trie = Trie::from_words(["if", "iffier"]);
/// let m = trie.longest_match("iffy rest").unwrap();
/// assert_eq!(m.chars, 2); // "iffier" stops matching at 'y', checkpoint is "if"
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    words: usize,
}

impl Trie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from a word list.
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a word. Inserting a word twice is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.words += 1;
        }
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let mut node = &self.root;
        for c in word.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.terminal
    }

    /// Longest stored word that is a prefix of `text`.
    ///
    /// Walks `text` character by character following existing edges,
    /// checkpointing at every terminal node visited, and stops at the first
    /// character lacking an edge (or at end of text). Returns the last
    /// checkpoint, or `None` when no stored word prefixes `text`.
    ///
    /// A shorter stored word that is a prefix of a longer one is reported
    /// only when the input stops matching the longer word's edges.
    #[must_use]
    pub fn longest_match(&self, text: &str) -> Option<TrieMatch> {
        let mut node = &self.root;
        let mut best = None;
        let mut chars = 0;
        for (offset, c) in text.char_indices() {
            match node.children.get(&c) {
                Some(child) => {
                    node = child;
                    chars += 1;
                    if node.terminal {
                        best = Some(TrieMatch {
                            chars,
                            bytes: offset + c.len_utf8(),
                        });
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Number of stored words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_exact_words() {
        let trie = Trie::from_words(["function", "takes", "num", "if", "else"]);
        assert!(trie.contains("function"));
        assert!(trie.contains("if"));
        assert!(!trie.contains("fun"));
        assert!(!trie.contains("hailstone"));
        assert!(!trie.contains(":"));
    }

    #[test]
    fn test_len_ignores_duplicates() {
        let mut trie = Trie::from_words(["if", "else"]);
        trie.insert("if");
        assert_eq!(trie.len(), 2);
        assert!(!trie.is_empty());
    }

    #[test]
    fn test_longest_match_simple() {
        let trie = Trie::from_words(["if"]);
        let m = trie.longest_match("if x").unwrap();
        assert_eq!(m.chars, 2);
        assert_eq!(m.bytes, 2);
    }

    #[test]
    fn test_longest_match_prefers_longer_word() {
        let trie = Trie::from_words([":", ":="]);
        assert_eq!(trie.longest_match(":= 1").unwrap().chars, 2);
        assert_eq!(trie.longest_match(": num").unwrap().chars, 1);
    }

    #[test]
    fn test_longest_match_falls_back_to_checkpoint() {
        // "iffier" matches through "iff", then 'y' has no edge; the last
        // terminal visited was "if".
        let trie = Trie::from_words(["if", "iffier"]);
        let m = trie.longest_match("iffy").unwrap();
        assert_eq!(m.chars, 2);
    }

    #[test]
    fn test_longest_match_none_without_prefix() {
        let trie = Trie::from_words(["if", "else"]);
        assert!(trie.longest_match("while").is_none());
        assert!(trie.longest_match("").is_none());
    }

    #[test]
    fn test_longest_match_at_end_of_text() {
        let trie = Trie::from_words(["function"]);
        let m = trie.longest_match("function").unwrap();
        assert_eq!(m.chars, 8);
        assert_eq!(m.bytes, 8);
    }

    #[test]
    fn test_longest_match_multibyte() {
        let trie = Trie::from_words(["λx"]);
        let m = trie.longest_match("λx.body").unwrap();
        assert_eq!(m.chars, 2);
        assert_eq!(m.bytes, 3);
    }

    #[test]
    fn test_word_not_matched_past_divergence() {
        let trie = Trie::from_words(["takes"]);
        assert!(trie.longest_match("take").is_none());
        assert_eq!(trie.longest_match("takess").unwrap().chars, 5);
    }
}
