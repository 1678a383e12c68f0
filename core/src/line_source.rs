//! Loading line sequences from files or standard input.
//!
//! An operand is either a file path or the reserved `-` token for standard
//! input. Lines are split on `\n`; the terminator and one optional preceding
//! `\r` are stripped, and an unterminated trailing line is kept. On
//! cancellation the prefix read so far travels with the error so a caller can
//! decide whether to salvage it.

use crate::cancel::{CancelGuard, Cancelled};
use crate::lines::LineSequence;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use thiserror::Error;

/// Operand value reserved for standard input.
pub const STDIN_OPERAND: &str = "-";

/// A named input to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    Stdin,
    Path(PathBuf),
}

impl DiffSource {
    pub fn from_operand(operand: &str) -> Self {
        if operand == STDIN_OPERAND {
            DiffSource::Stdin
        } else {
            DiffSource::Path(PathBuf::from(operand))
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("cancelled after reading {} lines", partial.len())]
    Cancelled { partial: LineSequence },
}

/// Reads a whole reader into a [`LineSequence`].
pub fn read_lines<R: BufRead>(
    mut reader: R,
    guard: &mut CancelGuard<'_>,
) -> Result<LineSequence, SourceError> {
    let mut lines: Vec<String> = Vec::new();
    let mut buf = String::new();

    loop {
        if let Err(Cancelled) = guard.check() {
            return Err(SourceError::Cancelled {
                partial: LineSequence::from_lines(lines),
            });
        }

        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            break;
        }

        if buf.ends_with('\n') {
            buf.pop();
        }
        if buf.ends_with('\r') {
            buf.pop();
        }
        lines.push(std::mem::take(&mut buf));
    }

    Ok(LineSequence::from_lines(lines))
}

/// Loads a source, borrowing the caller's stdin stream for the `-` operand.
pub fn load(
    source: &DiffSource,
    stdin: &mut dyn BufRead,
    guard: &mut CancelGuard<'_>,
) -> Result<LineSequence, SourceError> {
    match source {
        DiffSource::Stdin => read_lines(stdin, guard),
        DiffSource::Path(path) => {
            let file = File::open(path)?;
            read_lines(BufReader::new(file), guard)
        }
    }
}
