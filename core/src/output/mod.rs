//! Textual renderers for edit scripts.
//!
//! Each submodule implements one report format over the same inputs: the
//! edit script plus the ORIGINAL sequences (alignment may have run on
//! normalized views; what the user sees is always the source text). Output
//! is streamed line by line to the sink, with the cancellation guard polled
//! per emitted line.

pub mod context;
pub mod normal;
pub mod side_by_side;
pub mod unified;

use crate::diff::{DiffError, EditOp, EditScript};
use std::io;
use std::ops::Range;

pub(crate) fn out_err(source: io::Error) -> DiffError {
    DiffError::Output { source }
}

/// A contiguous block of changed ops plus its surrounding context window.
///
/// `ops` is the index range into the script to scan when rendering: the
/// changed ops of the block and the equal ops bordering or separating them.
/// Equal ops must be clipped to `a_range`/`b_range` when emitting context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hunk {
    pub ops: Range<usize>,
    pub a_range: Range<usize>,
    pub b_range: Range<usize>,
}

/// Groups changed ops into hunks, merging neighbors whose context windows
/// would meet or overlap (equal gap of at most `2 * context` lines).
pub(crate) fn collect_hunks(
    script: &EditScript,
    context: usize,
    a_total: usize,
    b_total: usize,
) -> Vec<Hunk> {
    let changed: Vec<usize> = script
        .ops
        .iter()
        .enumerate()
        .filter(|(_, op)| !op.is_equal())
        .map(|(idx, _)| idx)
        .collect();

    let mut hunks = Vec::new();
    let mut groups: Vec<(usize, usize)> = Vec::new();

    let mut iter = changed.into_iter();
    if let Some(first) = iter.next() {
        let mut start = first;
        let mut end = first;
        for idx in iter {
            let gap: usize = script.ops[end + 1..idx]
                .iter()
                .map(EditOp::a_len) // equal ops cover A and B alike
                .sum();
            if gap <= 2 * context {
                end = idx;
            } else {
                groups.push((start, end));
                start = idx;
                end = idx;
            }
        }
        groups.push((start, end));
    }

    for (start, end) in groups {
        let first = &script.ops[start];
        let last = &script.ops[end];

        let a_lo = first.a_pos().saturating_sub(context);
        let b_lo = first.b_pos().saturating_sub(context);
        let a_hi = (last.a_pos() + last.a_len() + context).min(a_total);
        let b_hi = (last.b_pos() + last.b_len() + context).min(b_total);

        let op_lo = start.saturating_sub(1);
        let op_hi = (end + 2).min(script.ops.len());

        hunks.push(Hunk {
            ops: op_lo..op_hi,
            a_range: a_lo..a_hi,
            b_range: b_lo..b_hi,
        });
    }

    hunks
}
