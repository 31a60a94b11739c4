//! Character-class tables used to build recognizer alphabets.
//!
//! Classes that cover large slices of the Unicode scalar space (printable
//! characters, letters) are computed once per process and shared; individual
//! recognizers clone a handle to the shared table rather than rebuilding it.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// An immutable set of characters, stored as sorted, non-overlapping
/// inclusive ranges and queried by binary search.
///
/// Cloning is cheap: the range table is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CharSet {
    ranges: Arc<[(char, char)]>,
}

impl CharSet {
    /// Build a set from arbitrary inclusive ranges. Ranges are sorted and
    /// merged, so overlapping or adjacent input ranges are fine.
    #[must_use]
    pub fn from_ranges(ranges: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut spans: Vec<(u32, u32)> = ranges
            .into_iter()
            .map(|(lo, hi)| (lo as u32, hi as u32))
            .filter(|(lo, hi)| lo <= hi)
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<(char, char)> = Vec::with_capacity(spans.len());
        let mut iter = spans.into_iter();
        if let Some((mut lo, mut hi)) = iter.next() {
            for (next_lo, next_hi) in iter {
                if next_lo <= hi.saturating_add(1) {
                    hi = hi.max(next_hi);
                } else {
                    push_span(&mut merged, lo, hi);
                    (lo, hi) = (next_lo, next_hi);
                }
            }
            push_span(&mut merged, lo, hi);
        }
        Self {
            ranges: merged.into(),
        }
    }

    /// Build a set from an explicit list of characters.
    #[must_use]
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_ranges(chars.into_iter().map(|c| (c, c)))
    }

    /// Build a set by scanning the whole Unicode scalar space with a
    /// predicate. Linear in the scalar space; intended for the shared
    /// process-wide tables below, not for per-call construction.
    #[must_use]
    pub fn from_predicate(pred: impl Fn(char) -> bool) -> Self {
        let mut ranges: Vec<(char, char)> = Vec::new();
        let mut run: Option<(char, char)> = None;
        for c in (0..=char::MAX as u32).filter_map(char::from_u32) {
            if pred(c) {
                match &mut run {
                    Some((_, hi)) => *hi = c,
                    None => run = Some((c, c)),
                }
            } else if let Some(span) = run.take() {
                ranges.push(span);
            }
        }
        if let Some(span) = run {
            ranges.push(span);
        }
        Self {
            ranges: ranges.into(),
        }
    }

    /// The decimal digits `0-9`.
    #[must_use]
    pub fn digits() -> Self {
        Self::from_ranges([('0', '9')])
    }

    /// Membership test, `O(log n)` over the range table.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if c < lo {
                    std::cmp::Ordering::Greater
                } else if c > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn push_span(out: &mut Vec<(char, char)>, lo: u32, hi: u32) {
    // Surrogate gaps inside a span are fine: from_u32 never yields them, so
    // contains() is never asked about them either.
    if let (Some(lo), Some(hi)) = (char::from_u32(lo), char::from_u32(hi)) {
        out.push((lo, hi));
    }
}

static PRINTABLE: Lazy<CharSet> = Lazy::new(|| CharSet::from_predicate(|c| !c.is_control()));

static GRAPHIC: Lazy<CharSet> =
    Lazy::new(|| CharSet::from_predicate(|c| !c.is_control() && !c.is_whitespace()));

static LETTERS: Lazy<CharSet> = Lazy::new(|| CharSet::from_predicate(char::is_alphabetic));

/// Displayable, non-control characters. The string-literal alphabet.
#[must_use]
pub fn printable() -> &'static CharSet {
    &PRINTABLE
}

/// Non-control, non-separator characters. The identifier continuation
/// alphabet.
#[must_use]
pub fn graphic() -> &'static CharSet {
    &GRAPHIC
}

/// Alphabetic characters. The identifier start class.
#[must_use]
pub fn letters() -> &'static CharSet {
    &LETTERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ranges_merges_overlaps() {
        let set = CharSet::from_ranges([('a', 'f'), ('d', 'k'), ('m', 'm')]);
        assert!(set.contains('a'));
        assert!(set.contains('k'));
        assert!(set.contains('m'));
        assert!(!set.contains('l'));
        assert!(!set.contains('n'));
    }

    #[test]
    fn test_from_ranges_merges_adjacent() {
        let set = CharSet::from_ranges([('a', 'c'), ('d', 'f')]);
        assert!(set.contains('c'));
        assert!(set.contains('d'));
        assert!(!set.contains('g'));
    }

    #[test]
    fn test_from_chars() {
        let set = CharSet::from_chars("0123456789.+-".chars());
        assert!(set.contains('0'));
        assert!(set.contains('.'));
        assert!(set.contains('+'));
        assert!(!set.contains('e'));
    }

    #[test]
    fn test_digits() {
        let digits = CharSet::digits();
        assert!(digits.contains('0'));
        assert!(digits.contains('9'));
        assert!(!digits.contains('a'));
    }

    #[test]
    fn test_printable_class() {
        let printable = printable();
        assert!(printable.contains('a'));
        assert!(printable.contains(' '));
        assert!(printable.contains('🥳'));
        assert!(!printable.contains('\n'));
        assert!(!printable.contains('\u{0}'));
    }

    #[test]
    fn test_graphic_class_excludes_separators() {
        let graphic = graphic();
        assert!(graphic.contains('a'));
        assert!(graphic.contains('-'));
        assert!(graphic.contains(':'));
        assert!(!graphic.contains(' '));
        assert!(!graphic.contains('\n'));
    }

    #[test]
    fn test_letters_class() {
        let letters = letters();
        assert!(letters.contains('a'));
        assert!(letters.contains('Z'));
        assert!(letters.contains('α'));
        assert!(letters.contains('ع'));
        assert!(!letters.contains('1'));
        assert!(!letters.contains('-'));
    }

    #[test]
    fn test_empty_set() {
        let set = CharSet::from_chars(std::iter::empty());
        assert!(set.is_empty());
        assert!(!set.contains('a'));
    }
}
