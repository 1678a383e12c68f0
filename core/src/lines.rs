//! Line sequence data model.
//!
//! A [`LineSequence`] is the unit every engine stage works over: an ordered,
//! 0-indexed list of line strings with the terminators already stripped.
//! Sequences are built once (by the loader, or by the normalizer for a
//! derived comparison view) and read-only afterwards.

use crate::cancel::{CancelGuard, Cancelled};
use std::ops::Index;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.lines[idx]
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self::from_lines(lines)
    }
}

impl FromIterator<String> for LineSequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_lines(iter.into_iter().collect())
    }
}

/// Element-wise equality of two sequences.
///
/// Short-circuits on the first length mismatch or differing pair. The check
/// compares exactly what it is given; callers pass normalized views when
/// normalization is enabled.
pub fn sequences_equal(
    a: &LineSequence,
    b: &LineSequence,
    guard: &mut CancelGuard<'_>,
) -> Result<bool, Cancelled> {
    if a.len() != b.len() {
        return Ok(false);
    }

    for (line_a, line_b) in a.iter().zip(b.iter()) {
        guard.check()?;
        if line_a != line_b {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::{CancelGuard, NeverCancel};

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn equal_sequences_compare_equal() {
        let a = seq(&["a", "b", "c"]);
        let b = seq(&["a", "b", "c"]);
        let mut guard = CancelGuard::new(&NeverCancel);
        assert!(sequences_equal(&a, &b, &mut guard).expect("no cancellation"));
    }

    #[test]
    fn length_mismatch_is_unequal() {
        let a = seq(&["a", "b"]);
        let b = seq(&["a", "b", "c"]);
        let mut guard = CancelGuard::new(&NeverCancel);
        assert!(!sequences_equal(&a, &b, &mut guard).expect("no cancellation"));
    }

    #[test]
    fn differing_pair_is_unequal() {
        let a = seq(&["a", "b", "c"]);
        let b = seq(&["a", "x", "c"]);
        let mut guard = CancelGuard::new(&NeverCancel);
        assert!(!sequences_equal(&a, &b, &mut guard).expect("no cancellation"));
    }

    #[test]
    fn empty_sequences_are_equal() {
        let a = LineSequence::new();
        let b = LineSequence::new();
        let mut guard = CancelGuard::new(&NeverCancel);
        assert!(sequences_equal(&a, &b, &mut guard).expect("no cancellation"));
        assert!(a.is_empty());
    }

    #[test]
    fn index_and_get_agree() {
        let a = seq(&["first", "second"]);
        assert_eq!(&a[1], "second");
        assert_eq!(a.get(1), Some("second"));
        assert_eq!(a.get(2), None);
    }
}
