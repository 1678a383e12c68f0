//! Sequence alignment producing an edit script.
//!
//! Two strategies are implemented:
//!
//! 1. **LCS** (default): trim the common prefix and suffix, intern the
//!    remaining lines to dense ids, run the classic O(n*m) dynamic program
//!    over the ids, and walk the table to emit Equal/Delete/Insert runs.
//!    This re-synchronizes after insertions and deletions and yields a
//!    minimal edit script.
//!
//! 2. **Positional**: walk both sequences in lockstep and report every
//!    index pair that differs as a replacement. Cheap, but a single shifted
//!    line makes every following line a replacement. Kept as the
//!    compatibility mode of the legacy command and as the over-budget
//!    fallback for the LCS table.
//!
//! The DP table is bounded by `lcs_work_limit` (cells after trimming);
//! exceeding it either falls back to positional alignment with a warning or
//! fails, per `on_limit_exceeded`.

use crate::cancel::{CancelGuard, Cancelled};
use crate::config::{AlignmentMode, DiffConfig, LimitBehavior};
use crate::diff::{DiffError, EditScript};
use crate::line_pool::LinePool;
use crate::lines::LineSequence;
use std::ops::Range;

/// Computes the correspondence between `a` and `b`.
///
/// Deterministic for the same inputs and configuration. The returned script
/// covers both sequences exactly; ties in the DP are broken toward the A
/// side, so deletions precede insertions within a changed run.
pub fn align(
    a: &LineSequence,
    b: &LineSequence,
    config: &DiffConfig,
    guard: &mut CancelGuard<'_>,
    warnings: &mut Vec<String>,
) -> Result<EditScript, DiffError> {
    let mut script = EditScript::new();

    match config.alignment {
        AlignmentMode::Positional => {
            align_positional(&mut script, a, b, 0..a.len(), 0..b.len(), guard)?;
        }
        AlignmentMode::Lcs => {
            align_lcs(&mut script, a, b, config, guard, warnings)?;
        }
    }

    debug_assert!(
        script.covers(a.len(), b.len()),
        "edit script must cover both sequences exactly"
    );
    Ok(script)
}

fn align_lcs(
    script: &mut EditScript,
    a: &LineSequence,
    b: &LineSequence,
    config: &DiffConfig,
    guard: &mut CancelGuard<'_>,
    warnings: &mut Vec<String>,
) -> Result<(), DiffError> {
    let a_len = a.len();
    let b_len = b.len();

    let mut prefix = 0usize;
    while prefix < a_len && prefix < b_len && a[prefix] == b[prefix] {
        guard.check()?;
        prefix += 1;
    }

    let mut suffix = 0usize;
    while suffix < a_len - prefix && suffix < b_len - prefix
        && a[a_len - 1 - suffix] == b[b_len - 1 - suffix]
    {
        guard.check()?;
        suffix += 1;
    }

    script.push_equal(0, 0, prefix);

    let mid_a = prefix..(a_len - suffix);
    let mid_b = prefix..(b_len - suffix);
    let n = mid_a.len();
    let m = mid_b.len();

    if n == 0 {
        script.push_insert(mid_a.start, mid_b.start, m);
    } else if m == 0 {
        script.push_delete(mid_a.start, n, mid_b.start);
    } else {
        let over_budget = n
            .checked_mul(m)
            .map_or(true, |cells| cells > config.lcs_work_limit);
        if over_budget {
            match config.on_limit_exceeded {
                LimitBehavior::ReturnError => {
                    return Err(DiffError::LimitsExceeded {
                        a_lines: n,
                        b_lines: m,
                        limit: config.lcs_work_limit,
                    });
                }
                LimitBehavior::FallbackToPositional => {
                    warnings.push(format!(
                        "alignment budget exceeded for {n}x{m} differing lines (limit {}); \
                         falling back to positional alignment; the edit script may not be minimal",
                        config.lcs_work_limit
                    ));
                    align_positional(script, a, b, mid_a, mid_b, guard)?;
                }
            }
        } else {
            lcs_middle(script, a, b, mid_a, mid_b, guard)?;
        }
    }

    script.push_equal(a_len - suffix, b_len - suffix, suffix);
    Ok(())
}

/// LCS dynamic program over the trimmed middle, formulated on suffixes so the
/// table walk emits ops left to right.
fn lcs_middle(
    script: &mut EditScript,
    a: &LineSequence,
    b: &LineSequence,
    a_range: Range<usize>,
    b_range: Range<usize>,
    guard: &mut CancelGuard<'_>,
) -> Result<(), Cancelled> {
    let mut pool = LinePool::new();
    let ids_a = pool.intern_range(a, a_range.start, a_range.end, guard)?;
    let ids_b = pool.intern_range(b, b_range.start, b_range.end, guard)?;
    let n = ids_a.len();
    let m = ids_b.len();

    // dp[i * width + j] = LCS length of ids_a[i..] vs ids_b[j..].
    let width = m + 1;
    let mut dp = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        guard.check()?;
        for j in (0..m).rev() {
            let idx = i * width + j;
            dp[idx] = if ids_a[i] == ids_b[j] {
                dp[idx + width + 1] + 1
            } else {
                dp[idx + width].max(dp[idx + 1])
            };
        }
    }

    let mut i = 0usize;
    let mut j = 0usize;
    while i < n && j < m {
        guard.check()?;
        if ids_a[i] == ids_b[j] {
            script.push_equal(a_range.start + i, b_range.start + j, 1);
            i += 1;
            j += 1;
        } else if dp[(i + 1) * width + j] >= dp[i * width + j + 1] {
            script.push_delete(a_range.start + i, 1, b_range.start + j);
            i += 1;
        } else {
            script.push_insert(a_range.start + i, b_range.start + j, 1);
            j += 1;
        }
    }
    if i < n {
        script.push_delete(a_range.start + i, n - i, b_range.start + j);
    }
    if j < m {
        script.push_insert(a_range.start + i, b_range.start + j, m - j);
    }

    Ok(())
}

fn align_positional(
    script: &mut EditScript,
    a: &LineSequence,
    b: &LineSequence,
    a_range: Range<usize>,
    b_range: Range<usize>,
    guard: &mut CancelGuard<'_>,
) -> Result<(), Cancelled> {
    let mut i = a_range.start;
    let mut j = b_range.start;

    while i < a_range.end || j < b_range.end {
        guard.check()?;
        if i >= a_range.end {
            script.push_insert(i, j, 1);
            j += 1;
        } else if j >= b_range.end {
            script.push_delete(i, 1, j);
            i += 1;
        } else if a[i] == b[j] {
            script.push_equal(i, j, 1);
            i += 1;
            j += 1;
        } else {
            script.push_delete(i, 1, j);
            script.push_insert(i + 1, j, 1);
            i += 1;
            j += 1;
        }
    }

    Ok(())
}
