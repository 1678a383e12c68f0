//! Comparison-time line normalization.
//!
//! Normalization produces a derived view used only for equality and
//! alignment; renderers always show the original text. Both rules preserve
//! sequence length and order, so indices computed on a normalized view are
//! valid for the original.

use crate::cancel::{CancelGuard, Cancelled};
use crate::config::DiffConfig;
use crate::lines::LineSequence;
use thiserror::Error;

/// The optional, composable normalization rules: case folding and
/// whitespace collapsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    pub fold_case: bool,
    pub collapse_whitespace: bool,
}

#[derive(Debug, Error)]
#[error("cancelled after normalizing {} lines", prefix.len())]
pub struct NormalizeCancelled {
    /// The already-normalized prefix at the moment cancellation was seen.
    pub prefix: LineSequence,
}

impl Normalizer {
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            fold_case: config.ignore_case,
            collapse_whitespace: config.ignore_whitespace,
        }
    }

    pub fn is_noop(&self) -> bool {
        !self.fold_case && !self.collapse_whitespace
    }

    /// Case folding applies before whitespace collapsing, matching the order
    /// the flags compose in the original command.
    pub fn normalize_line(&self, line: &str) -> String {
        let folded;
        let mut current: &str = line;
        if self.fold_case {
            folded = current.to_lowercase();
            current = &folded;
        }
        if self.collapse_whitespace {
            return current.split_whitespace().collect::<Vec<_>>().join(" ");
        }
        current.to_owned()
    }

    /// Pure transformation of a whole sequence; the input is untouched and
    /// the output has the same length and order.
    pub fn normalize(
        &self,
        seq: &LineSequence,
        guard: &mut CancelGuard<'_>,
    ) -> Result<LineSequence, NormalizeCancelled> {
        let mut out: Vec<String> = Vec::with_capacity(seq.len());
        for line in seq.iter() {
            if let Err(Cancelled) = guard.check() {
                return Err(NormalizeCancelled {
                    prefix: LineSequence::from_lines(out),
                });
            }
            out.push(self.normalize_line(line));
        }
        Ok(LineSequence::from_lines(out))
    }
}
