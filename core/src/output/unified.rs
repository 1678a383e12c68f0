//! Unified diff rendering (`---`/`+++` header, `@@` hunks).

use super::{Hunk, collect_hunks, out_err};
use crate::cancel::CancelGuard;
use crate::diff::{DiffError, EditOp, EditScript};
use crate::lines::LineSequence;
use std::io::Write;
use std::ops::Range;

pub fn write_unified<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    b: &LineSequence,
    a_label: &str,
    b_label: &str,
    context: u32,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    writeln!(w, "--- {a_label}").map_err(out_err)?;
    writeln!(w, "+++ {b_label}").map_err(out_err)?;

    for hunk in collect_hunks(script, context as usize, a.len(), b.len()) {
        write_hunk(w, script, a, b, &hunk, guard)?;
    }

    Ok(())
}

fn write_hunk<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    b: &LineSequence,
    hunk: &Hunk,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    writeln!(
        w,
        "@@ -{},{} +{},{} @@",
        hunk_start(&hunk.a_range),
        hunk.a_range.len(),
        hunk_start(&hunk.b_range),
        hunk.b_range.len(),
    )
    .map_err(out_err)?;

    for op in &script.ops[hunk.ops.clone()] {
        match *op {
            EditOp::Equal { a_start, len, .. } => {
                let lo = a_start.max(hunk.a_range.start);
                let hi = (a_start + len).min(hunk.a_range.end);
                for idx in lo..hi {
                    guard.check()?;
                    writeln!(w, " {}", &a[idx]).map_err(out_err)?;
                }
            }
            EditOp::Delete { a_start, a_len, .. } => {
                write_side(w, a, a_start..a_start + a_len, '-', guard)?;
            }
            EditOp::Insert { b_start, b_len, .. } => {
                write_side(w, b, b_start..b_start + b_len, '+', guard)?;
            }
            EditOp::Replace {
                a_start,
                a_len,
                b_start,
                b_len,
            } => {
                write_side(w, a, a_start..a_start + a_len, '-', guard)?;
                write_side(w, b, b_start..b_start + b_len, '+', guard)?;
            }
        }
    }

    Ok(())
}

fn write_side<W: Write>(
    w: &mut W,
    seq: &LineSequence,
    range: Range<usize>,
    prefix: char,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    for idx in range {
        guard.check()?;
        writeln!(w, "{prefix}{}", &seq[idx]).map_err(out_err)?;
    }
    Ok(())
}

/// 1-indexed hunk start; an empty range reports the line it follows.
fn hunk_start(range: &Range<usize>) -> usize {
    if range.is_empty() {
        range.start
    } else {
        range.start + 1
    }
}
