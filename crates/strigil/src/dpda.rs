//! Deterministic pushdown automaton engine.
//!
//! A finite-state machine with an auxiliary stack, used to recognize nested
//! and balanced structure. Transitions resolve in a fixed chain: the exact
//! input symbol before the epsilon (wildcard) input entry, and within an
//! input branch the exact top-of-stack symbol before the wildcard stack
//! entry. An exact stack match pops; a wildcard match leaves the stack
//! untouched. Epsilon moves never consume input — the same symbol is
//! reprocessed against the reorganized state and stack.
//!
//! A transition may carry an embedded [`PrefixRecognizer`]: the step then
//! hands the remaining input to it and skips however many symbols it
//! accepted, so the pushdown automaton needs no per-character states for
//! leaf tokens like numeric literals.

use crate::charset::CharSet;
use crate::error::AutomatonError;
use crate::nfa::{PrefixRecognizer, StateId};
use crate::recognizer::NumberRecognizer;
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use std::sync::Arc;

type Push = SmallVec<[char; 2]>;

/// What a resolved transition does: move to `next`, push `push` (in order,
/// last pushed becomes the new top), and optionally delegate input
/// consumption to an embedded recognizer.
#[derive(Clone)]
pub enum Action {
    Ordinary {
        next: StateId,
        push: Push,
    },
    Delegate {
        next: StateId,
        push: Push,
        recognizer: Arc<dyn PrefixRecognizer>,
    },
}

impl Action {
    /// Move to `next` without pushing.
    #[must_use]
    pub fn to(next: StateId) -> Self {
        Self::Ordinary {
            next,
            push: Push::new(),
        }
    }

    /// Move to `next`, pushing the given symbols.
    #[must_use]
    pub fn push(next: StateId, symbols: &[char]) -> Self {
        Self::Ordinary {
            next,
            push: Push::from_slice(symbols),
        }
    }

    /// Move to `next` and hand the remaining input to `recognizer`.
    #[must_use]
    pub fn delegate(next: StateId, recognizer: Arc<dyn PrefixRecognizer>) -> Self {
        Self::Delegate {
            next,
            push: Push::new(),
            recognizer,
        }
    }

    fn next(&self) -> StateId {
        match self {
            Self::Ordinary { next, .. } | Self::Delegate { next, .. } => *next,
        }
    }

    fn pushed(&self) -> &[char] {
        match self {
            Self::Ordinary { push, .. } | Self::Delegate { push, .. } => push,
        }
    }

    fn recognizer(&self) -> Option<&Arc<dyn PrefixRecognizer>> {
        match self {
            Self::Ordinary { .. } => None,
            Self::Delegate { recognizer, .. } => Some(recognizer),
        }
    }
}

/// Per-(state, input) stack sub-table.
#[derive(Clone, Default)]
struct StackBranch {
    /// Exact top-of-stack entries; taking one pops the top.
    by_top: HashMap<char, Action, ahash::RandomState>,
    /// Wildcard entry; taking it leaves the stack as-is.
    any_top: Option<Action>,
}

#[derive(Clone, Default)]
struct StateTable {
    by_symbol: HashMap<char, StackBranch, ahash::RandomState>,
    epsilon: Option<StackBranch>,
}

/// Runtime configuration of one `accepts` run. The definition itself stays
/// read-only, so a single [`Dpda`] serves any number of callers.
struct Config {
    state: StateId,
    stack: Vec<char>,
    skip: usize,
}

/// How resolving a stack branch went. `NoMatch` leaves the configuration
/// untouched; `DelegateRejected` aborts the whole step (the stack move was
/// already taken, so falling through to another branch is not sound).
enum Outcome {
    Applied,
    NoMatch,
    DelegateRejected,
}

/// An immutable DPDA definition. Built through [`DpdaBuilder`].
pub struct Dpda {
    states: Vec<StateTable>,
    #[allow(dead_code)]
    input_alphabet: CharSet,
    start: StateId,
    start_stack: char,
    accepting: Vec<bool>,
}

impl Dpda {
    /// Run the automaton over the whole input.
    ///
    /// Feeds symbols one at a time through the step relation (honoring
    /// skips recorded by delegation), drains trailing epsilon transitions
    /// once input is exhausted, and accepts iff the final state is an
    /// accept state. Any step with no matching branch rejects immediately.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut cfg = Config {
            state: self.start,
            stack: vec![self.start_stack],
            skip: 0,
        };

        for (offset, symbol) in input.char_indices() {
            if cfg.skip > 0 {
                cfg.skip -= 1;
                continue;
            }
            if !self.step(&mut cfg, symbol, &input[offset..]) {
                log::trace!("dpda: rejected at {symbol:?}, state {:?}", cfg.state);
                return false;
            }
        }

        // Trailing structure unwinds through epsilon moves, e.g. down to a
        // final state once only the base stack symbol remains.
        while let Some(branch) = self.states[cfg.state.0 as usize].epsilon.as_ref() {
            match self.apply(&mut cfg, branch, "") {
                Outcome::Applied => {}
                Outcome::NoMatch | Outcome::DelegateRejected => return false,
            }
        }

        self.accepting[cfg.state.0 as usize]
    }

    /// One step of the relation for `symbol`; `rest` is the input suffix
    /// beginning at `symbol` (what an embedded recognizer sees).
    fn step(&self, cfg: &mut Config, symbol: char, rest: &str) -> bool {
        let table = &self.states[cfg.state.0 as usize];
        if let Some(branch) = table.by_symbol.get(&symbol) {
            match self.apply(cfg, branch, rest) {
                Outcome::Applied => return true,
                Outcome::DelegateRejected => return false,
                Outcome::NoMatch => {}
            }
        }
        if let Some(branch) = table.epsilon.as_ref() {
            match self.apply(cfg, branch, rest) {
                // The epsilon move only reorganized state and stack; the
                // symbol still has to be consumed from the new
                // configuration.
                Outcome::Applied => return self.step(cfg, symbol, rest),
                Outcome::NoMatch | Outcome::DelegateRejected => return false,
            }
        }
        false
    }

    fn apply(&self, cfg: &mut Config, branch: &StackBranch, rest: &str) -> Outcome {
        let Some(&top) = cfg.stack.last() else {
            return Outcome::NoMatch;
        };
        let action = if let Some(action) = branch.by_top.get(&top) {
            cfg.stack.pop();
            action
        } else if let Some(action) = &branch.any_top {
            action
        } else {
            return Outcome::NoMatch;
        };

        for &symbol in action.pushed() {
            cfg.stack.push(symbol);
        }
        cfg.state = action.next();

        if let Some(recognizer) = action.recognizer() {
            let r = recognizer.recognize(rest);
            if !r.matched || r.chars == 0 {
                log::trace!("dpda: delegate rejected {rest:?}");
                return Outcome::DelegateRejected;
            }
            log::trace!("dpda: delegate consumed {} symbols of {rest:?}", r.chars);
            cfg.skip = r.chars - 1;
        }
        Outcome::Applied
    }
}

/// Builds a [`Dpda`], validating the transition table at `build()` time.
pub struct DpdaBuilder {
    states: Vec<StateTable>,
    input_alphabet: CharSet,
    stack_alphabet: HashSet<char, ahash::RandomState>,
    start: Option<StateId>,
    start_stack: Option<char>,
    accepting: Vec<StateId>,
    referenced: Vec<StateId>,
}

impl DpdaBuilder {
    #[must_use]
    pub fn new(input_alphabet: CharSet, stack_alphabet: impl IntoIterator<Item = char>) -> Self {
        Self {
            states: Vec::new(),
            input_alphabet,
            stack_alphabet: stack_alphabet.into_iter().collect(),
            start: None,
            start_stack: None,
            accepting: Vec::new(),
            referenced: Vec::new(),
        }
    }

    /// Allocate a fresh state.
    pub fn state(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(StateTable::default());
        id
    }

    /// Add a transition entry. `on` is the input symbol (`None` = epsilon)
    /// and `top` the required top of stack (`None` = wildcard, no pop).
    /// A later entry for the same (state, input, top) replaces the earlier
    /// one, keeping the table deterministic.
    pub fn transition(
        &mut self,
        from: StateId,
        on: Option<char>,
        top: Option<char>,
        action: Action,
    ) -> &mut Self {
        self.referenced.push(from);
        if let Some(table) = self.states.get_mut(from.0 as usize) {
            let branch = match on {
                Some(symbol) => table.by_symbol.entry(symbol).or_default(),
                None => table.epsilon.get_or_insert_with(StackBranch::default),
            };
            match top {
                Some(symbol) => {
                    branch.by_top.insert(symbol, action);
                }
                None => branch.any_top = Some(action),
            }
        }
        self
    }

    pub fn start(&mut self, state: StateId) -> &mut Self {
        self.start = Some(state);
        self
    }

    pub fn start_stack_symbol(&mut self, symbol: char) -> &mut Self {
        self.start_stack = Some(symbol);
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
    /// Returns an [`AutomatonError`] when the table references undefined
    /// states, uses symbols outside the declared alphabets, or attaches an
    /// embedded recognizer to an epsilon entry (an epsilon move consumes no
    /// input, so there is nothing to delegate).
    pub fn build(self) -> Result<Dpda, AutomatonError> {
        let count = self.states.len() as u32;
        let start = self.start.ok_or(AutomatonError::MissingStart)?;
        if start.0 >= count {
            return Err(AutomatonError::UndefinedStart(start));
        }
        let start_stack = self.start_stack.ok_or(AutomatonError::MissingStart)?;
        if !self.stack_alphabet.contains(&start_stack) {
            return Err(AutomatonError::StackSymbolOutsideAlphabet(start_stack));
        }
        if let Some(&bad) = self.referenced.iter().find(|s| s.0 >= count) {
            return Err(AutomatonError::UndefinedState(bad));
        }
        if let Some(&bad) = self.accepting.iter().find(|s| s.0 >= count) {
            return Err(AutomatonError::UndefinedAccept(bad));
        }

        for (id, table) in self.states.iter().enumerate() {
            for (&symbol, branch) in &table.by_symbol {
                if !self.input_alphabet.contains(symbol) {
                    return Err(AutomatonError::SymbolOutsideAlphabet(symbol));
                }
                Self::check_branch(branch, &self.stack_alphabet, count)?;
            }
            if let Some(branch) = &table.epsilon {
                Self::check_branch(branch, &self.stack_alphabet, count)?;
                for action in branch.by_top.values().chain(branch.any_top.iter()) {
                    if action.recognizer().is_some() {
                        return Err(AutomatonError::DelegateOnEpsilon(StateId(id as u32)));
                    }
                }
            }
        }

        let mut accepting = vec![false; self.states.len()];
        for state in &self.accepting {
            accepting[state.0 as usize] = true;
        }
        Ok(Dpda {
            states: self.states,
            input_alphabet: self.input_alphabet,
            start,
            start_stack,
            accepting,
        })
    }

    fn check_branch(
        branch: &StackBranch,
        stack_alphabet: &HashSet<char, ahash::RandomState>,
        count: u32,
    ) -> Result<(), AutomatonError> {
        for &top in branch.by_top.keys() {
            if !stack_alphabet.contains(&top) {
                return Err(AutomatonError::StackSymbolOutsideAlphabet(top));
            }
        }
        for action in branch.by_top.values().chain(branch.any_top.iter()) {
            if action.next().0 >= count {
                return Err(AutomatonError::UndefinedState(action.next()));
            }
            for &pushed in action.pushed() {
                if !stack_alphabet.contains(&pushed) {
                    return Err(AutomatonError::StackSymbolOutsideAlphabet(pushed));
                }
            }
        }
        Ok(())
    }
}

/// Balanced `(`/`)` strings.
///
/// The stack depth counts open groups: `(` pushes a marker over the base
/// symbol, `)` pops one, and a trailing epsilon move consumes the base
/// symbol into the accept state once everything closed.
pub struct BracketRecognizer {
    dpda: Dpda,
}

impl BracketRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let mut b = DpdaBuilder::new(CharSet::from_chars("()".chars()), ['B', '1']);
        let begin = b.state();
        let opening = b.state();
        let closing = b.state();
        let end = b.state();

        b.transition(begin, None, None, Action::to(opening));
        b.transition(opening, Some('('), None, Action::push(opening, &['1']));
        b.transition(opening, Some(')'), Some('1'), Action::to(closing));
        b.transition(closing, Some('('), None, Action::push(opening, &['1']));
        b.transition(closing, Some(')'), Some('1'), Action::to(closing));
        b.transition(closing, None, Some('B'), Action::to(end));
        b.start(begin);
        b.start_stack_symbol('B');
        b.accept(end);

        let dpda = b.build().expect("bracket recognizer tables are well-formed");
        Self { dpda }
    }

    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        self.dpda.accepts(input)
    }
}

impl Default for BracketRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Nested arithmetic groups: numbers and `+ - * / %` inside balanced
/// parentheses, e.g. `(45*(3+2))`.
///
/// Whole numeric literals are delegated mid-stream to a
/// [`NumberRecognizer`], so the stack machine only tracks group structure
/// and operator/operand alternation, never individual digits.
pub struct GroupRecognizer {
    dpda: Dpda,
}

impl GroupRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let numbers: Arc<dyn PrefixRecognizer> = Arc::new(NumberRecognizer::new());
        let mut b = DpdaBuilder::new(
            CharSet::from_chars("()0123456789.+-*/%".chars()),
            ['B', '1'],
        );
        let begin = b.state();
        let operand = b.state();
        let operated = b.state();
        let end = b.state();

        b.transition(begin, None, None, Action::to(operand));
        b.transition(operand, Some('('), None, Action::push(operand, &['1']));
        for digit in '0'..='9' {
            b.transition(
                operand,
                Some(digit),
                None,
                Action::delegate(operated, Arc::clone(&numbers)),
            );
        }
        b.transition(operated, Some(')'), Some('1'), Action::to(operated));
        for op in ['+', '-', '*', '/', '%'] {
            b.transition(operated, Some(op), None, Action::to(operand));
        }
        b.transition(operated, None, Some('B'), Action::to(end));
        b.start(begin);
        b.start_stack_symbol('B');
        b.accept(end);

        let dpda = b.build().expect("group recognizer tables are well-formed");
        Self { dpda }
    }

    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        self.dpda.accepts(input)
    }
}

impl Default for GroupRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
