//! Side-by-side rendering: two padded columns with a marker gutter.

use super::out_err;
use crate::cancel::CancelGuard;
use crate::diff::{DiffError, EditOp, EditScript};
use crate::lines::LineSequence;
use std::io::Write;

const COLUMN_WIDTH: usize = 40;

pub fn write_side_by_side<W: Write>(
    w: &mut W,
    script: &EditScript,
    a: &LineSequence,
    b: &LineSequence,
    guard: &mut CancelGuard<'_>,
) -> Result<(), DiffError> {
    for op in &script.ops {
        match *op {
            EditOp::Equal {
                a_start,
                b_start,
                len,
            } => {
                for offset in 0..len {
                    guard.check()?;
                    write_row(w, &a[a_start + offset], &b[b_start + offset], ' ')?;
                }
            }
            EditOp::Delete { a_start, a_len, .. } => {
                for idx in a_start..a_start + a_len {
                    guard.check()?;
                    write_row(w, &a[idx], "", '|')?;
                }
            }
            EditOp::Insert { b_start, b_len, .. } => {
                for idx in b_start..b_start + b_len {
                    guard.check()?;
                    write_row(w, "", &b[idx], '|')?;
                }
            }
            EditOp::Replace {
                a_start,
                a_len,
                b_start,
                b_len,
            } => {
                for offset in 0..a_len.max(b_len) {
                    guard.check()?;
                    let left = if offset < a_len { &a[a_start + offset] } else { "" };
                    let right = if offset < b_len { &b[b_start + offset] } else { "" };
                    write_row(w, left, right, '|')?;
                }
            }
        }
    }

    Ok(())
}

fn write_row<W: Write>(w: &mut W, left: &str, right: &str, gutter: char) -> Result<(), DiffError> {
    writeln!(
        w,
        "{left:<width$} {gutter} {right:<width$}",
        width = COLUMN_WIDTH
    )
    .map_err(out_err)
}
