//! Toolkit-facing entry point for one comparison.
//!
//! `execute` owns the full control flow: operand validation, loading,
//! optional normalization, the equality short-circuit, brief reporting, and
//! renderer dispatch. Diagnostics go to the caller's error stream in the
//! `diff: ...` shape; the primary report goes to the output stream. The
//! caller maps the returned result to its exit convention: a rendered diff
//! is still a success, and [`DiffSummary::differs`] says whether the inputs
//! matched.

use crate::align::align;
use crate::cancel::{CancelGuard, CancelSignal};
use crate::config::{DiffConfig, OutputFormat};
use crate::diff::{DiffError, DiffSummary};
use crate::line_source::{self, DiffSource, SourceError};
use crate::lines::{LineSequence, sequences_equal};
use crate::normalize::Normalizer;
use crate::output::{context, normal, side_by_side, unified};
use std::io::{BufRead, Write};

pub fn execute<W: Write, E: Write>(
    operands: &[String],
    config: &DiffConfig,
    stdin: &mut dyn BufRead,
    stdout: &mut W,
    stderr: &mut E,
    cancel: &dyn CancelSignal,
) -> Result<DiffSummary, DiffError> {
    let mut guard = CancelGuard::new(cancel);
    guard.poll()?;

    if operands.len() < 2 {
        let _ = writeln!(stderr, "diff: missing operand");
        return Err(DiffError::MissingOperand);
    }
    if operands.len() > 2 {
        let operand = operands[2].clone();
        let _ = writeln!(stderr, "diff: extra operand '{operand}'");
        return Err(DiffError::ExtraOperand { operand });
    }

    let a_label = operands[0].as_str();
    let b_label = operands[1].as_str();

    let a = load_operand(a_label, stdin, &mut guard, stderr)?;
    let b = load_operand(b_label, stdin, &mut guard, stderr)?;

    let mut warnings = Vec::new();

    // Comparison views: alignment and equality run on these, renderers on
    // the originals. Lengths match, so indices carry over.
    let normalizer = Normalizer::from_config(config);
    let (view_a, view_b);
    let (cmp_a, cmp_b): (&LineSequence, &LineSequence) = if normalizer.is_noop() {
        (&a, &b)
    } else {
        view_a = normalizer
            .normalize(&a, &mut guard)
            .map_err(|_| DiffError::Cancelled)?;
        view_b = normalizer
            .normalize(&b, &mut guard)
            .map_err(|_| DiffError::Cancelled)?;
        (&view_a, &view_b)
    };

    if sequences_equal(cmp_a, cmp_b, &mut guard)? {
        return Ok(DiffSummary::equal());
    }

    if config.brief {
        writeln!(stdout, "Files {a_label} and {b_label} differ")
            .map_err(|source| DiffError::Output { source })?;
        return Ok(DiffSummary::differs(warnings));
    }

    let script = align(cmp_a, cmp_b, config, &mut guard, &mut warnings)?;

    match config.output_format() {
        OutputFormat::Unified => unified::write_unified(
            stdout,
            &script,
            &a,
            &b,
            a_label,
            b_label,
            config.unified_context_lines(),
            &mut guard,
        )?,
        OutputFormat::SideBySide => {
            side_by_side::write_side_by_side(stdout, &script, &a, &b, &mut guard)?
        }
        OutputFormat::Context => context::write_context(
            stdout,
            &script,
            &a,
            &b,
            a_label,
            b_label,
            config.context_diff_lines(),
            &mut guard,
        )?,
        OutputFormat::Normal => normal::write_normal(stdout, &script, &a, &b, &mut guard)?,
    }

    Ok(DiffSummary::differs(warnings))
}

/// Loads one operand, reporting I/O failures on the diagnostic stream.
/// A partial sequence from a cancelled read is discarded: nothing has been
/// compared yet, so there is nothing worth salvaging.
fn load_operand<E: Write>(
    operand: &str,
    stdin: &mut dyn BufRead,
    guard: &mut CancelGuard<'_>,
    stderr: &mut E,
) -> Result<LineSequence, DiffError> {
    let source = DiffSource::from_operand(operand);
    match line_source::load(&source, stdin, guard) {
        Ok(lines) => Ok(lines),
        Err(SourceError::Cancelled { .. }) => Err(DiffError::Cancelled),
        Err(SourceError::Io(source)) => {
            let err = DiffError::Io {
                path: operand.to_owned(),
                source,
            };
            let _ = writeln!(stderr, "diff: {err}");
            Err(err)
        }
    }
}
