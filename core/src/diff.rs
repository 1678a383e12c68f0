//! Edit operations, scripts, and errors for line comparison.
//!
//! This module defines the types shared by the aligner and the renderers:
//! - [`EditOp`]: one aligned unit (equal run, deletion, insertion, replacement)
//! - [`EditScript`]: an ordered, gap-free covering of both sequences
//! - [`DiffSummary`]: what a completed invocation reports back to the caller
//! - [`DiffError`]: errors that abort an invocation

use crate::cancel::Cancelled;
use thiserror::Error;

/// A single aligned unit between sequence A and sequence B.
///
/// Positions are 0-indexed. `Delete` records the B cursor it sits at and
/// `Insert` the A cursor, so renderers can emit ed-style range commands
/// without rescanning the script. The enum is `#[non_exhaustive]` to allow
/// future additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum EditOp {
    Equal {
        a_start: usize,
        b_start: usize,
        len: usize,
    },
    Delete {
        a_start: usize,
        a_len: usize,
        b_pos: usize,
    },
    Insert {
        a_pos: usize,
        b_start: usize,
        b_len: usize,
    },
    Replace {
        a_start: usize,
        a_len: usize,
        b_start: usize,
        b_len: usize,
    },
}

impl EditOp {
    pub fn is_equal(&self) -> bool {
        matches!(self, EditOp::Equal { .. })
    }

    /// Number of A lines this op covers.
    pub fn a_len(&self) -> usize {
        match *self {
            EditOp::Equal { len, .. } => len,
            EditOp::Delete { a_len, .. } => a_len,
            EditOp::Insert { .. } => 0,
            EditOp::Replace { a_len, .. } => a_len,
        }
    }

    /// Number of B lines this op covers.
    pub fn b_len(&self) -> usize {
        match *self {
            EditOp::Equal { len, .. } => len,
            EditOp::Delete { .. } => 0,
            EditOp::Insert { b_len, .. } => b_len,
            EditOp::Replace { b_len, .. } => b_len,
        }
    }

    /// First A index covered, or the A cursor for insertions.
    pub fn a_pos(&self) -> usize {
        match *self {
            EditOp::Equal { a_start, .. } => a_start,
            EditOp::Delete { a_start, .. } => a_start,
            EditOp::Insert { a_pos, .. } => a_pos,
            EditOp::Replace { a_start, .. } => a_start,
        }
    }

    /// First B index covered, or the B cursor for deletions.
    pub fn b_pos(&self) -> usize {
        match *self {
            EditOp::Equal { b_start, .. } => b_start,
            EditOp::Delete { b_pos, .. } => b_pos,
            EditOp::Insert { b_start, .. } => b_start,
            EditOp::Replace { b_start, .. } => b_start,
        }
    }
}

/// Ordered list of [`EditOp`] covering all of A and B, left to right, with
/// no gaps and no overlaps.
///
/// The push helpers coalesce as they go: contiguous runs of the same kind
/// extend the previous op, and a deletion run meeting an insertion run at the
/// same cursor fuses into a `Replace`. Producers only ever append.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditScript {
    pub ops: Vec<EditOp>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(EditOp::is_equal)
    }

    pub(crate) fn push_equal(&mut self, a_start: usize, b_start: usize, len: usize) {
        if len == 0 {
            return;
        }
        if let Some(EditOp::Equal {
            a_start: s,
            b_start: t,
            len: run,
        }) = self.ops.last_mut()
        {
            if *s + *run == a_start && *t + *run == b_start {
                *run += len;
                return;
            }
        }
        self.ops.push(EditOp::Equal {
            a_start,
            b_start,
            len,
        });
    }

    pub(crate) fn push_delete(&mut self, a_start: usize, a_len: usize, b_pos: usize) {
        if a_len == 0 {
            return;
        }
        let merged = match self.ops.last().copied() {
            Some(EditOp::Delete {
                a_start: s,
                a_len: run,
                b_pos: p,
            }) if s + run == a_start && p == b_pos => Some(EditOp::Delete {
                a_start: s,
                a_len: run + a_len,
                b_pos: p,
            }),
            Some(EditOp::Replace {
                a_start: s,
                a_len: run_a,
                b_start: t,
                b_len: run_b,
            }) if s + run_a == a_start && t + run_b == b_pos => Some(EditOp::Replace {
                a_start: s,
                a_len: run_a + a_len,
                b_start: t,
                b_len: run_b,
            }),
            Some(EditOp::Insert {
                a_pos,
                b_start,
                b_len,
            }) if a_pos == a_start && b_start + b_len == b_pos => Some(EditOp::Replace {
                a_start,
                a_len,
                b_start,
                b_len,
            }),
            _ => None,
        };

        match merged {
            Some(op) => {
                let last = self.ops.len() - 1;
                self.ops[last] = op;
            }
            None => self.ops.push(EditOp::Delete {
                a_start,
                a_len,
                b_pos,
            }),
        }
    }

    pub(crate) fn push_insert(&mut self, a_pos: usize, b_start: usize, b_len: usize) {
        if b_len == 0 {
            return;
        }
        let merged = match self.ops.last().copied() {
            Some(EditOp::Insert {
                a_pos: p,
                b_start: t,
                b_len: run,
            }) if t + run == b_start && p == a_pos => Some(EditOp::Insert {
                a_pos: p,
                b_start: t,
                b_len: run + b_len,
            }),
            Some(EditOp::Replace {
                a_start: s,
                a_len: run_a,
                b_start: t,
                b_len: run_b,
            }) if t + run_b == b_start && s + run_a == a_pos => Some(EditOp::Replace {
                a_start: s,
                a_len: run_a,
                b_start: t,
                b_len: run_b + b_len,
            }),
            Some(EditOp::Delete {
                a_start,
                a_len,
                b_pos,
            }) if b_pos == b_start && a_start + a_len == a_pos => Some(EditOp::Replace {
                a_start,
                a_len,
                b_start,
                b_len,
            }),
            _ => None,
        };

        match merged {
            Some(op) => {
                let last = self.ops.len() - 1;
                self.ops[last] = op;
            }
            None => self.ops.push(EditOp::Insert {
                a_pos,
                b_start,
                b_len,
            }),
        }
    }

    /// Checks the covering invariant against the source lengths: A-spans
    /// concatenate to `0..a_len` in order and B-spans to `0..b_len`, with
    /// no empty ops.
    pub fn covers(&self, a_len: usize, b_len: usize) -> bool {
        let mut cur_a = 0usize;
        let mut cur_b = 0usize;

        for op in &self.ops {
            match *op {
                EditOp::Equal {
                    a_start,
                    b_start,
                    len,
                } => {
                    if a_start != cur_a || b_start != cur_b || len == 0 {
                        return false;
                    }
                    cur_a += len;
                    cur_b += len;
                }
                EditOp::Delete {
                    a_start,
                    a_len,
                    b_pos,
                } => {
                    if a_start != cur_a || b_pos != cur_b || a_len == 0 {
                        return false;
                    }
                    cur_a += a_len;
                }
                EditOp::Insert {
                    a_pos,
                    b_start,
                    b_len,
                } => {
                    if a_pos != cur_a || b_start != cur_b || b_len == 0 {
                        return false;
                    }
                    cur_b += b_len;
                }
                EditOp::Replace {
                    a_start,
                    a_len,
                    b_start,
                    b_len,
                } => {
                    if a_start != cur_a || b_start != cur_b || a_len == 0 || b_len == 0 {
                        return false;
                    }
                    cur_a += a_len;
                    cur_b += b_len;
                }
            }
        }

        cur_a == a_len && cur_b == b_len
    }
}

/// What a completed invocation reports back.
///
/// `warnings` carries advisory notes (for example an alignment budget
/// fallback); callers decide whether and how to print them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    /// Whether the two inputs differ after normalization.
    pub differs: bool,
    pub warnings: Vec<String>,
}

impl DiffSummary {
    pub fn equal() -> Self {
        Self {
            differs: false,
            warnings: Vec::new(),
        }
    }

    pub fn differs(warnings: Vec<String>) -> Self {
        Self {
            differs: true,
            warnings,
        }
    }
}

/// Errors that abort a diff invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiffError {
    #[error("missing operand")]
    MissingOperand,

    #[error("extra operand '{operand}'")]
    ExtraOperand { operand: String },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write error: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error(
        "alignment limits exceeded: {a_lines}x{b_lines} lines over budget {limit}; \
         raise `lcs_work_limit` or switch `on_limit_exceeded` to the positional fallback"
    )]
    LimitsExceeded {
        a_lines: usize,
        b_lines: usize,
        limit: usize,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl From<Cancelled> for DiffError {
    fn from(_: Cancelled) -> Self {
        DiffError::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_equal_runs_coalesce() {
        let mut script = EditScript::new();
        script.push_equal(0, 0, 2);
        script.push_equal(2, 2, 3);
        assert_eq!(
            script.ops,
            vec![EditOp::Equal {
                a_start: 0,
                b_start: 0,
                len: 5
            }]
        );
    }

    #[test]
    fn delete_then_insert_fuses_into_replace() {
        let mut script = EditScript::new();
        script.push_equal(0, 0, 1);
        script.push_delete(1, 1, 1);
        script.push_insert(2, 1, 1);
        assert_eq!(
            script.ops,
            vec![
                EditOp::Equal {
                    a_start: 0,
                    b_start: 0,
                    len: 1
                },
                EditOp::Replace {
                    a_start: 1,
                    a_len: 1,
                    b_start: 1,
                    b_len: 1
                },
            ]
        );
    }

    #[test]
    fn replace_absorbs_trailing_insert_runs() {
        let mut script = EditScript::new();
        script.push_delete(0, 1, 0);
        script.push_insert(1, 0, 1);
        script.push_insert(1, 1, 2);
        assert_eq!(
            script.ops,
            vec![EditOp::Replace {
                a_start: 0,
                a_len: 1,
                b_start: 0,
                b_len: 3
            }]
        );
    }

    #[test]
    fn covers_accepts_a_gapless_script() {
        let mut script = EditScript::new();
        script.push_equal(0, 0, 1);
        script.push_delete(1, 1, 1);
        script.push_equal(2, 1, 2);
        script.push_insert(4, 3, 1);
        assert!(script.covers(4, 4));
        assert!(!script.is_identity());
    }

    #[test]
    fn covers_rejects_gaps_and_wrong_lengths() {
        let mut script = EditScript::new();
        script.push_equal(0, 0, 2);
        assert!(!script.covers(3, 2));

        let gapped = EditScript {
            ops: vec![
                EditOp::Equal {
                    a_start: 0,
                    b_start: 0,
                    len: 1,
                },
                EditOp::Equal {
                    a_start: 2,
                    b_start: 2,
                    len: 1,
                },
            ],
        };
        assert!(!gapped.covers(3, 3));
    }

    #[test]
    fn empty_script_covers_empty_inputs_only() {
        let script = EditScript::new();
        assert!(script.covers(0, 0));
        assert!(!script.covers(1, 0));
        assert!(script.is_identity());
    }

    #[test]
    fn edit_op_serde_uses_kind_tag() {
        let op = EditOp::Replace {
            a_start: 1,
            a_len: 2,
            b_start: 1,
            b_len: 1,
        };
        let json = serde_json::to_string(&op).expect("serialize op");
        assert!(json.contains("\"kind\":\"replace\""), "got {json}");
        let parsed: EditOp = serde_json::from_str(&json).expect("deserialize op");
        assert_eq!(parsed, op);
    }
}
