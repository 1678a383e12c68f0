//! Context diff rendering (`***`/`---` headers and two-sided hunks).
//!
//! Each hunk prints the A side and the B side separately. A side that has no
//! changed lines of its own prints only its range header, the convention of
//! the classic format.

use super::{Hunk, collect_hunks, out_err};
use crate::cancel::CancelGuard;
use crate::diff::{DiffError, EditOp, EditScript};
use crate::lines::LineSequence;
use std::io::Write;
use std::ops::Range;

pub fn write_context<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    b: &LineSequence,
    a_label: &str,
    b_label: &str,
    context: u32,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    writeln!(w, "*** {a_label}").map_err(out_err)?;
    writeln!(w, "--- {b_label}").map_err(out_err)?;

    for hunk in collect_hunks(script, context as usize, a.len(), b.len()) {
        writeln!(w, "***************").map_err(out_err)?;
        write_a_side(w, script, a, &hunk, guard)?;
        write_b_side(w, script, b, &hunk, guard)?;
    }

    Ok(())
}

fn write_a_side<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    hunk: &Hunk,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    writeln!(w, "*** {} ****", context_range(&hunk.a_range)).map_err(out_err)?;

    let ops = &script.ops[hunk.ops.clone()];
    let has_changes = ops
        .iter()
        .any(|op| matches!(op, EditOp::Delete { .. } | EditOp::Replace { .. }));
    if !has_changes {
        return Ok(());
    }

    for op in ops {
        match *op {
            EditOp::Equal { a_start, len, .. } => {
                let lo = a_start.max(hunk.a_range.start);
                let hi = (a_start + len).min(hunk.a_range.end);
                write_lines(w, a, lo..hi, "  ", guard)?;
            }
            EditOp::Delete { a_start, a_len, .. } => {
                write_lines(w, a, a_start..a_start + a_len, "- ", guard)?;
            }
            EditOp::Replace { a_start, a_len, .. } => {
                write_lines(w, a, a_start..a_start + a_len, "! ", guard)?;
            }
            EditOp::Insert { .. } => {}
        }
    }

    Ok(())
}

fn write_b_side<W: Write>(
    w: &mut W,
    script: &EditScript,
    b: &LineSequence,
    hunk: &Hunk,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    writeln!(w, "--- {} ----", context_range(&hunk.b_range)).map_err(out_err)?;

    let ops = &script.ops[hunk.ops.clone()];
    let has_changes = ops
        .iter()
        .any(|op| matches!(op, EditOp::Insert { .. } | EditOp::Replace { .. }));
    if !has_changes {
        return Ok(());
    }

    for op in ops {
        match *op {
            EditOp::Equal { b_start, len, .. } => {
                let lo = b_start.max(hunk.b_range.start);
                let hi = (b_start + len).min(hunk.b_range.end);
                write_lines(w, b, lo..hi, "  ", guard)?;
            }
            EditOp::Insert { b_start, b_len, .. } => {
                write_lines(w, b, b_start..b_start + b_len, "+ ", guard)?;
            }
            EditOp::Replace { b_start, b_len, .. } => {
                write_lines(w, b, b_start..b_start + b_len, "! ", guard)?;
            }
            EditOp::Delete { .. } => {}
        }
    }

    Ok(())
}

fn write_lines<W: Write>(
    w: &mut W,
    seq: &LineSequence,
    range: Range<usize>,
    prefix: &str,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    for idx in range {
        guard.check()?;
        writeln!(w, "{prefix}{}", &seq[idx]).map_err(out_err)?;
    }
    Ok(())
}

/// 1-indexed inclusive range; single lines collapse to one number and an
/// empty range reports the line it follows.
fn context_range(range: &Range<usize>) -> String {
    if range.is_empty() {
        format!("{}", range.start)
    } else if range.len() == 1 {
        format!("{}", range.start + 1)
    } else {
        format!("{},{}", range.start + 1, range.end)
    }
}
