//! Nondeterministic finite automaton engine, used as a prefix recognizer.
//!
//! The engine simulates a set of concurrently active states. Per state, a
//! symbol resolves against an explicit single-character edge first, then the
//! union of the state's matching character-class edges, then its wildcard
//! (fallback) edge; a state with none of these contributes nothing to the
//! next active set.
//!
//! Recognition never fails outright on long input: the first character
//! outside the declared alphabet (or an empty next active set) simply stops
//! the walk, and the result reports the best accepted prefix seen so far.

use crate::charset::CharSet;
use crate::error::AutomatonError;
use smallvec::SmallVec;

/// Dense automaton state identifier, allocated by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub u32);

type Targets = SmallVec<[StateId; 2]>;

/// Result of a prefix-recognition run: whether any accepted prefix exists,
/// and its length. `chars` and `bytes` are both zero when `matched` is
/// false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recognition {
    pub matched: bool,
    /// Accepted prefix length in characters.
    pub chars: usize,
    /// Accepted prefix length in bytes (UTF-8).
    pub bytes: usize,
}

impl Recognition {
    const NONE: Self = Self {
        matched: false,
        chars: 0,
        bytes: 0,
    };
}

/// The embedded-recognizer contract: anything that can report the longest
/// accepted prefix of a text. Definitions are immutable, so one instance
/// may serve any number of callers.
pub trait PrefixRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Recognition;
}

#[derive(Debug, Default)]
struct StateEdges {
    by_char: hashbrown::HashMap<char, Targets, ahash::RandomState>,
    by_class: Vec<(CharSet, Targets)>,
    wildcard: Option<Targets>,
}

impl StateEdges {
    fn for_each_target(&self, c: char, mut visit: impl FnMut(StateId)) {
        if let Some(targets) = self.by_char.get(&c) {
            for &target in targets {
                visit(target);
            }
            return;
        }
        let mut class_hit = false;
        for (class, targets) in &self.by_class {
            if class.contains(c) {
                class_hit = true;
                for &target in targets {
                    visit(target);
                }
            }
        }
        if class_hit {
            return;
        }
        if let Some(targets) = &self.wildcard {
            for &target in targets {
                visit(target);
            }
        }
    }
}

/// An immutable NFA definition: states, input alphabet, transition
/// relation, start state, and accept states. Built through [`NfaBuilder`].
#[derive(Debug)]
pub struct Nfa {
    alphabet: CharSet,
    states: Vec<StateEdges>,
    start: StateId,
    accepting: Vec<bool>,
}

impl Nfa {
    /// Longest accepted prefix of `text`.
    ///
    /// The walk consumes symbols while the alphabet and transition relation
    /// allow, checkpointing the consumed length whenever an active state is
    /// accepting, and reports the last checkpoint when it stops.
    #[must_use]
    pub fn recognize(&self, text: &str) -> Recognition {
        let mut current: SmallVec<[StateId; 8]> = SmallVec::new();
        current.push(self.start);

        let mut best = if self.accepting[self.start.0 as usize] {
            Some(Recognition {
                matched: true,
                chars: 0,
                bytes: 0,
            })
        } else {
            None
        };
        let mut chars = 0;
        let mut bytes = 0;

        for c in text.chars() {
            if !self.alphabet.contains(c) {
                log::trace!("nfa: stop, {c:?} outside alphabet after {chars} symbols");
                break;
            }
            let mut next: SmallVec<[StateId; 8]> = SmallVec::new();
            for &state in &current {
                self.states[state.0 as usize].for_each_target(c, |target| {
                    if !next.contains(&target) {
                        next.push(target);
                    }
                });
            }
            if next.is_empty() {
                log::trace!("nfa: stop, no transition on {c:?} after {chars} symbols");
                break;
            }
            chars += 1;
            bytes += c.len_utf8();
            current = next;
            if current.iter().any(|s| self.accepting[s.0 as usize]) {
                best = Some(Recognition {
                    matched: true,
                    chars,
                    bytes,
                });
            }
        }

        best.unwrap_or(Recognition::NONE)
    }
}

impl PrefixRecognizer for Nfa {
    fn recognize(&self, text: &str) -> Recognition {
        Nfa::recognize(self, text)
    }
}

/// Builds an [`Nfa`], validating the transition table at `build()` time.
pub struct NfaBuilder {
    alphabet: CharSet,
    states: Vec<StateEdges>,
    start: Option<StateId>,
    accepting: Vec<StateId>,
    referenced: Vec<StateId>,
    symbols: Vec<char>,
}

impl NfaBuilder {
    #[must_use]
    pub fn new(alphabet: CharSet) -> Self {
        Self {
            alphabet,
            states: Vec::new(),
            start: None,
            accepting: Vec::new(),
            referenced: Vec::new(),
            symbols: Vec::new(),
        }
    }

    /// Allocate a fresh state.
    pub fn state(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(StateEdges::default());
        id
    }

    /// Add an explicit single-symbol edge. Repeated calls accumulate
    /// targets (that is the nondeterminism).
    pub fn transition(&mut self, from: StateId, on: char, to: StateId) -> &mut Self {
        self.referenced.push(from);
        self.referenced.push(to);
        self.symbols.push(on);
        if let Some(edges) = self.states.get_mut(from.0 as usize) {
            edges.by_char.entry(on).or_default().push(to);
        }
        self
    }

    /// Add an edge over a whole character class. A symbol with no explicit
    /// edge takes the union of every matching class edge; only when no
    /// class matches does the wildcard apply.
    pub fn class_transition(&mut self, from: StateId, class: CharSet, to: StateId) -> &mut Self {
        self.referenced.push(from);
        self.referenced.push(to);
        if let Some(edges) = self.states.get_mut(from.0 as usize) {
            edges.by_class.push((class, SmallVec::from_slice(&[to])));
        }
        self
    }

    /// Add the wildcard (fallback) edge: taken for any alphabet symbol with
    /// no explicit or class edge at the state.
    pub fn wildcard(&mut self, from: StateId, to: StateId) -> &mut Self {
        self.referenced.push(from);
        self.referenced.push(to);
        if let Some(edges) = self.states.get_mut(from.0 as usize) {
            edges.wildcard.get_or_insert_with(SmallVec::new).push(to);
        }
        self
    }

    pub fn start(&mut self, state: StateId) -> &mut Self {
        self.referenced.push(state);
        self.start = Some(state);
        self
    }

    pub fn accept(&mut self, state: StateId) -> &mut Self {
        self.accepting.push(state);
        self
    }

    /// Validate and freeze the definition.
    ///
    /// # Errors
    ///
    /// Returns an [`AutomatonError`] when a transition references a state
    /// that was never allocated, an explicit symbol falls outside the
    /// alphabet, or the start/accept states are undefined.
    pub fn build(self) -> Result<Nfa, AutomatonError> {
        let count = self.states.len() as u32;
        let start = self.start.ok_or(AutomatonError::MissingStart)?;
        if start.0 >= count {
            return Err(AutomatonError::UndefinedStart(start));
        }
        if let Some(&bad) = self.referenced.iter().find(|s| s.0 >= count) {
            return Err(AutomatonError::UndefinedState(bad));
        }
        if let Some(&bad) = self.accepting.iter().find(|s| s.0 >= count) {
            return Err(AutomatonError::UndefinedAccept(bad));
        }
        if let Some(&bad) = self.symbols.iter().find(|c| !self.alphabet.contains(**c)) {
            return Err(AutomatonError::SymbolOutsideAlphabet(bad));
        }

        let mut accepting = vec![false; self.states.len()];
        for state in &self.accepting {
            accepting[state.0 as usize] = true;
        }
        Ok(Nfa {
            alphabet: self.alphabet,
            states: self.states,
            start,
            accepting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // start --a--> mid --b--> done, accepting {done}
    fn linear_ab() -> Nfa {
        let mut b = NfaBuilder::new(CharSet::from_chars("ab".chars()));
        let start = b.state();
        let mid = b.state();
        let done = b.state();
        b.transition(start, 'a', mid);
        b.transition(mid, 'b', done);
        b.start(start);
        b.accept(done);
        b.build().unwrap()
    }

    #[test]
    fn test_recognizes_exact_word() {
        let nfa = linear_ab();
        let r = nfa.recognize("ab");
        assert!(r.matched);
        assert_eq!(r.chars, 2);
        assert_eq!(r.bytes, 2);
    }

    #[test]
    fn test_prefix_semantics_stop_outside_alphabet() {
        // 'c' is outside the alphabet; recognition stops and reports the
        // checkpoint, it does not fail.
        let nfa = linear_ab();
        let r = nfa.recognize("abc");
        assert!(r.matched);
        assert_eq!(r.chars, 2);
    }

    #[test]
    fn test_stop_on_drained_active_set() {
        // 'a' then 'a': mid has no 'a' edge, the next set drains, and
        // acceptance is evaluated on the prior set (not accepting).
        let nfa = linear_ab();
        assert!(!nfa.recognize("aa").matched);
    }

    #[test]
    fn test_incomplete_input_rejected() {
        let nfa = linear_ab();
        assert!(!nfa.recognize("a").matched);
        assert!(!nfa.recognize("").matched);
    }

    #[test]
    fn test_wildcard_taken_only_without_explicit_edge() {
        // body: 'x' ends, anything else loops via wildcard.
        let mut b = NfaBuilder::new(CharSet::from_chars("abx".chars()));
        let body = b.state();
        let done = b.state();
        b.transition(body, 'x', done);
        b.wildcard(body, body);
        b.start(body);
        b.accept(done);
        let nfa = b.build().unwrap();

        assert_eq!(nfa.recognize("abx").chars, 3);
        assert!(!nfa.recognize("abab").matched);
    }

    #[test]
    fn test_class_transition_beats_wildcard() {
        let mut b = NfaBuilder::new(CharSet::from_chars("ab12".chars()));
        let start = b.state();
        let digit = b.state();
        let other = b.state();
        b.class_transition(start, CharSet::digits(), digit);
        b.wildcard(start, other);
        b.start(start);
        b.accept(digit);
        let nfa = b.build().unwrap();

        assert!(nfa.recognize("1").matched);
        assert!(!nfa.recognize("a").matched);
    }

    #[test]
    fn test_checkpoint_tracks_best_prefix() {
        // Accepts "a" and "aba"; input "ab" stops with checkpoint 1.
        let mut b = NfaBuilder::new(CharSet::from_chars("ab".chars()));
        let start = b.state();
        let one = b.state();
        let two = b.state();
        let three = b.state();
        b.transition(start, 'a', one);
        b.transition(one, 'b', two);
        b.transition(two, 'a', three);
        b.start(start);
        b.accept(one);
        b.accept(three);
        let nfa = b.build().unwrap();

        assert_eq!(nfa.recognize("ab").chars, 1);
        assert_eq!(nfa.recognize("aba").chars, 3);
    }

    #[test]
    fn test_accepting_start_matches_empty_prefix() {
        let mut b = NfaBuilder::new(CharSet::from_chars("a".chars()));
        let start = b.state();
        b.start(start);
        b.accept(start);
        let nfa = b.build().unwrap();

        let r = nfa.recognize("zzz");
        assert!(r.matched);
        assert_eq!(r.chars, 0);
    }

    #[test]
    fn test_build_rejects_undefined_state() {
        let mut b = NfaBuilder::new(CharSet::from_chars("a".chars()));
        let start = b.state();
        b.transition(start, 'a', StateId(9));
        b.start(start);
        assert_eq!(
            b.build().unwrap_err(),
            AutomatonError::UndefinedState(StateId(9))
        );
    }

    #[test]
    fn test_build_rejects_missing_start() {
        let mut b = NfaBuilder::new(CharSet::from_chars("a".chars()));
        let _ = b.state();
        assert_eq!(b.build().unwrap_err(), AutomatonError::MissingStart);
    }

    #[test]
    fn test_build_rejects_symbol_outside_alphabet() {
        let mut b = NfaBuilder::new(CharSet::from_chars("a".chars()));
        let start = b.state();
        b.transition(start, 'z', start);
        b.start(start);
        assert_eq!(
            b.build().unwrap_err(),
            AutomatonError::SymbolOutsideAlphabet('z')
        );
    }

    #[test]
    fn test_build_rejects_undefined_accept() {
        let mut b = NfaBuilder::new(CharSet::from_chars("a".chars()));
        let start = b.state();
        b.start(start);
        b.accept(StateId(4));
        assert_eq!(
            b.build().unwrap_err(),
            AutomatonError::UndefinedAccept(StateId(4))
        );
    }
}
