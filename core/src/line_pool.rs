//! Interning of line text for fast alignment comparisons.
//!
//! The LCS table compares lines many times; interning each distinct line to a
//! dense [`LineId`] up front turns every later comparison into an integer
//! equality. Hash collisions are resolved by comparing the stored text, so
//! two ids are equal exactly when the lines are equal.

use crate::cancel::{CancelGuard, Cancelled};
use crate::lines::LineSequence;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct LineId(u32);

#[derive(Debug)]
enum Bucket {
    One(LineId),
    Many(Vec<LineId>),
}

#[derive(Debug, Default)]
pub(crate) struct LinePool {
    lines: Vec<String>,
    index: FxHashMap<u64, Bucket>,
}

impl LinePool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, line: &str) -> LineId {
        let h = hash_line(line);
        let lines = &mut self.lines;
        let index = &mut self.index;

        if let Some(bucket) = index.get_mut(&h) {
            match bucket {
                Bucket::One(existing) => {
                    let id = *existing;
                    if lines[id.0 as usize] == line {
                        return id;
                    }
                    let new_id = LineId(lines.len() as u32);
                    lines.push(line.to_owned());
                    *bucket = Bucket::Many(vec![id, new_id]);
                    new_id
                }
                Bucket::Many(ids) => {
                    for &id in ids.iter() {
                        if lines[id.0 as usize] == line {
                            return id;
                        }
                    }
                    let new_id = LineId(lines.len() as u32);
                    lines.push(line.to_owned());
                    ids.push(new_id);
                    new_id
                }
            }
        } else {
            let id = LineId(lines.len() as u32);
            lines.push(line.to_owned());
            index.insert(h, Bucket::One(id));
            id
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    /// Interns a slice of a sequence, polling the guard per line.
    pub(crate) fn intern_range(
        &mut self,
        seq: &LineSequence,
        start: usize,
        end: usize,
        guard: &mut CancelGuard<'_>,
    ) -> Result<Vec<LineId>, Cancelled> {
        let mut ids = Vec::with_capacity(end - start);
        for idx in start..end {
            guard.check()?;
            ids.push(self.intern(&seq[idx]));
        }
        Ok(ids)
    }
}

fn hash_line(line: &str) -> u64 {
    let mut hasher = FxHasher::default();
    line.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::NeverCancel;

    #[test]
    fn interning_the_same_line_returns_the_same_id() {
        let mut pool = LinePool::new();
        let first = pool.intern("fn main() {}");
        for _ in 0..1_000 {
            assert_eq!(pool.intern("fn main() {}"), first);
        }
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn distinct_lines_get_distinct_ids() {
        let mut pool = LinePool::new();
        let a = pool.intern("alpha");
        let b = pool.intern("beta");
        let empty = pool.intern("");
        assert_ne!(a, b);
        assert_ne!(a, empty);
        assert_ne!(b, empty);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn intern_range_maps_equal_lines_across_sequences() {
        let mut pool = LinePool::new();
        let a: LineSequence = ["x", "y", "z"].map(String::from).to_vec().into();
        let b: LineSequence = ["y", "z", "w"].map(String::from).to_vec().into();

        let mut guard = CancelGuard::new(&NeverCancel);
        let ids_a = pool
            .intern_range(&a, 0, a.len(), &mut guard)
            .expect("no cancellation");
        let ids_b = pool
            .intern_range(&b, 0, b.len(), &mut guard)
            .expect("no cancellation");

        assert_eq!(ids_a[1], ids_b[0]);
        assert_eq!(ids_a[2], ids_b[1]);
        assert_ne!(ids_a[0], ids_b[2]);
    }
}
