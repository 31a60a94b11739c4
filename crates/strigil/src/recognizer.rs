//! Concrete NFA instances: string literals, identifiers, and numbers.
//!
//! Each recognizer freezes its state table once at construction and shares
//! the process-wide character-class tables from [`crate::charset`].

use crate::charset::{self, CharSet};
use crate::nfa::{Nfa, NfaBuilder, PrefixRecognizer, Recognition};

/// Quote-delimited string literals over the printable alphabet.
///
/// Backslash escapes exactly `"` and `\`; any other printable character
/// flows through the body via the wildcard edge.
pub struct StringRecognizer {
    nfa: Nfa,
}

impl StringRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let mut b = NfaBuilder::new(charset::printable().clone());
        let start = b.state();
        let body = b.state();
        let escape = b.state();
        let done = b.state();
        b.transition(start, '"', body);
        b.transition(body, '"', done);
        b.transition(body, '\\', escape);
        b.wildcard(body, body);
        b.transition(escape, '"', body);
        b.transition(escape, '\\', body);
        b.start(start);
        b.accept(done);
        let nfa = b.build().expect("string recognizer tables are well-formed");
        Self { nfa }
    }
}

impl Default for StringRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixRecognizer for StringRecognizer {
    fn recognize(&self, text: &str) -> Recognition {
        self.nfa.recognize(text)
    }
}

/// Identifiers: a leading letter, continued by letters or other graphic
/// characters, accepted only up to the last letter.
///
/// Mark/continuation characters may appear mid-identifier (`look-forward`,
/// `x'`), but a prefix ending on one is not itself accepting, so the
/// reported match always ends on a letter.
pub struct IdentifierRecognizer {
    nfa: Nfa,
}

impl IdentifierRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let mut b = NfaBuilder::new(charset::graphic().clone());
        let start = b.state();
        let mid = b.state();
        let end = b.state();
        b.class_transition(start, charset::letters().clone(), end);
        b.class_transition(mid, charset::letters().clone(), end);
        b.class_transition(end, charset::letters().clone(), end);
        b.wildcard(mid, mid);
        b.wildcard(end, mid);
        b.start(start);
        b.accept(end);
        let nfa = b
            .build()
            .expect("identifier recognizer tables are well-formed");
        Self { nfa }
    }
}

impl Default for IdentifierRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixRecognizer for IdentifierRecognizer {
    fn recognize(&self, text: &str) -> Recognition {
        self.nfa.recognize(text)
    }
}

/// Numeric literals: optional sign, integer part, optional fraction.
///
/// A lone `0` (optionally signed) is a complete integer distinct from a
/// non-zero digit run, so `0123` matches only its first character. A
/// fraction needs at least one digit: `34.` matches as the integer `34`
/// with the dot unconsumed. Trailing fraction zeros run through their own
/// state so `123.450` is consumed whole.
pub struct NumberRecognizer {
    nfa: Nfa,
}

impl NumberRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let nonzero = CharSet::from_ranges([('1', '9')]);
        let mut b = NfaBuilder::new(CharSet::from_chars("0123456789.+-".chars()));
        let start = b.state();
        let sign = b.state();
        let zero = b.state();
        let signed_zero = b.state();
        let int = b.state();
        let digits = b.state();
        let frac = b.state();
        let frac_digits = b.state();
        let trailing = b.state();

        b.transition(start, '+', sign);
        b.transition(start, '-', sign);
        b.transition(start, '0', zero);
        b.class_transition(start, nonzero.clone(), int);

        b.transition(sign, '0', signed_zero);
        b.class_transition(sign, nonzero.clone(), int);

        b.transition(zero, '.', frac);
        b.transition(signed_zero, '.', frac);

        b.transition(int, '.', frac);
        b.class_transition(int, CharSet::digits(), digits);
        b.transition(digits, '.', frac);
        b.class_transition(digits, CharSet::digits(), digits);

        b.transition(frac, '0', trailing);
        b.class_transition(frac, nonzero.clone(), frac_digits);
        b.transition(frac_digits, '0', trailing);
        b.class_transition(frac_digits, nonzero.clone(), frac_digits);
        b.transition(trailing, '0', trailing);
        b.class_transition(trailing, nonzero, frac_digits);

        b.start(start);
        b.accept(zero);
        b.accept(signed_zero);
        b.accept(int);
        b.accept(digits);
        b.accept(frac_digits);
        b.accept(trailing);
        let nfa = b.build().expect("number recognizer tables are well-formed");
        Self { nfa }
    }
}

impl Default for NumberRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixRecognizer for NumberRecognizer {
    fn recognize(&self, text: &str) -> Recognition {
        self.nfa.recognize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len_of(r: &impl PrefixRecognizer, text: &str) -> Option<usize> {
        let m = r.recognize(text);
        m.matched.then_some(m.chars)
    }

    #[test]
    fn test_string_literals() {
        let strings = StringRecognizer::new();
        assert_eq!(len_of(&strings, r#""hello""#), Some(7));
        assert_eq!(len_of(&strings, r#""he said \"hi\"""#), Some(16));
        assert_eq!(len_of(&strings, r#""\\""#), Some(4));
        assert_eq!(len_of(&strings, r#""Vعry 🥳 vαlid!""#), Some(15));
        assert_eq!(len_of(&strings, "invalid"), None);
        assert_eq!(len_of(&strings, r#""unterminated"#), None);
    }

    #[test]
    fn test_string_stops_at_closing_quote() {
        let strings = StringRecognizer::new();
        assert_eq!(len_of(&strings, r#""ab" rest"#), Some(4));
    }

    #[test]
    fn test_string_rejects_unknown_escape() {
        let strings = StringRecognizer::new();
        // \n inside a literal: the escape state has no 'n' edge.
        assert_eq!(len_of(&strings, r#""a\n""#), None);
    }

    #[test]
    fn test_identifiers() {
        let idents = IdentifierRecognizer::new();
        assert_eq!(len_of(&idents, "iffy"), Some(4));
        assert_eq!(len_of(&idents, "a"), Some(1));
        assert_eq!(len_of(&idents, "a:=1"), Some(1));
        assert_eq!(len_of(&idents, "look-forward-by x"), Some(15));
        assert_eq!(len_of(&idents, "9lives"), None);
        assert_eq!(len_of(&idents, ":="), None);
    }

    #[test]
    fn test_identifier_must_end_on_letter() {
        let idents = IdentifierRecognizer::new();
        assert_eq!(len_of(&idents, "abc- "), Some(3));
        assert_eq!(len_of(&idents, "x''"), Some(1));
    }

    #[test]
    fn test_numbers() {
        let numbers = NumberRecognizer::new();
        assert_eq!(len_of(&numbers, "0"), Some(1));
        assert_eq!(len_of(&numbers, "1"), Some(1));
        assert_eq!(len_of(&numbers, "123"), Some(3));
        assert_eq!(len_of(&numbers, "+123"), Some(4));
        assert_eq!(len_of(&numbers, "-123"), Some(4));
        assert_eq!(len_of(&numbers, "+0"), Some(2));
        assert_eq!(len_of(&numbers, "-0"), Some(2));
        assert_eq!(len_of(&numbers, "123.45"), Some(6));
        assert_eq!(len_of(&numbers, "123.450"), Some(7));
        assert_eq!(len_of(&numbers, "34.056"), Some(6));
        assert_eq!(len_of(&numbers, "304.56"), Some(6));
        assert_eq!(len_of(&numbers, "+"), None);
        assert_eq!(len_of(&numbers, "-"), None);
        assert_eq!(len_of(&numbers, ".45"), None);
    }

    #[test]
    fn test_number_fraction_needs_a_digit() {
        let numbers = NumberRecognizer::new();
        assert_eq!(len_of(&numbers, "34."), Some(2));
        assert_eq!(len_of(&numbers, "34.x"), Some(2));
    }

    #[test]
    fn test_number_leading_zero_is_complete() {
        let numbers = NumberRecognizer::new();
        assert_eq!(len_of(&numbers, "0123"), Some(1));
        assert_eq!(len_of(&numbers, "0.5"), Some(3));
        assert_eq!(len_of(&numbers, "-0.75"), Some(5));
    }

    #[test]
    fn test_number_trailing_zeros_resume() {
        let numbers = NumberRecognizer::new();
        assert_eq!(len_of(&numbers, "1.0102"), Some(6));
        assert_eq!(len_of(&numbers, "1.100"), Some(5));
    }
}
