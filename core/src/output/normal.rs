//! Normal (ed-style) diff rendering.
//!
//! Each non-equal op becomes one command line with 1-indexed ranges:
//! `<a-range>a<b-range>` for appends, `<a-range>d<b-range>` for deletions,
//! `<a-range>c<b-range>` for changes. The untouched side of an append or
//! deletion prints the line the change sits after.

use super::out_err;
use crate::cancel::CancelGuard;
use crate::diff::{DiffError, EditOp, EditScript};
use crate::lines::LineSequence;
use std::io::Write;
use std::ops::Range;

pub fn write_normal<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    b: &LineSequence,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    for op in &script.ops {
        match *op {
            EditOp::Equal { .. } => {}
            EditOp::Delete {
                a_start,
                a_len,
                b_pos,
            } => {
                writeln!(w, "{}d{}", range_1(a_start, a_len), b_pos).map_err(out_err)?;
                write_lines(w, a, a_start..a_start + a_len, "< ", guard)?;
            }
            EditOp::Insert {
                a_pos,
                b_start,
                b_len,
            } => {
                writeln!(w, "{}a{}", a_pos, range_1(b_start, b_len)).map_err(out_err)?;
                write_lines(w, b, b_start..b_start + b_len, "> ", guard)?;
            }
            EditOp::Replace {
                a_start,
                a_len,
                b_start,
                b_len,
            } => {
                writeln!(w, "{}c{}", range_1(a_start, a_len), range_1(b_start, b_len))
                    .map_err(out_err)?;
                write_lines(w, a, a_start..a_start + a_len, "< ", guard)?;
                writeln!(w, "---").map_err(out_err)?;
                write_lines(w, b, b_start..b_start + b_len, "> ", guard)?;
            }
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

/// 1-indexed range, collapsing single lines to one number.
fn range_1(start: usize, len: usize) -> String {
    if len == 1 {
        format!("{}", start + 1)
    } else {
        format!("{},{}", start + 1, start + len)
    }
}
