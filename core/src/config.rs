//! Configuration for the diff engine.
//!
//! `DiffConfig` centralizes the per-invocation output flags and alignment
//! knobs so no behavioral constant hides in a call site. It is built once,
//! validated, and passed by reference into the engine entry point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How positions in A are matched to positions in B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// Longest-common-subsequence alignment: minimal edit script,
    /// re-synchronizes after insertions and deletions.
    Lcs,
    /// Lockstep index walk. Never re-synchronizes after a shift; kept for
    /// behavioral parity with the legacy command.
    Positional,
}

/// What to do when the LCS table would exceed [`DiffConfig::lcs_work_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitBehavior {
    FallbackToPositional,
    ReturnError,
}

/// Which renderer a non-brief invocation uses, after precedence resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Unified,
    SideBySide,
    Context,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub unified: bool,
    /// Context width for unified hunks; `None` means the default width.
    /// Setting a width selects unified mode by itself.
    pub unified_context: Option<u32>,
    pub context_diff: bool,
    /// Context width for context hunks, same resolution rule as above.
    pub context_lines: Option<u32>,
    pub brief: bool,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub side_by_side: bool,
    /// Reserved for directory comparison; the line engine ignores it.
    pub recursive: bool,
    pub alignment: AlignmentMode,
    /// Cell budget for the LCS table (rows x columns after trimming the
    /// common prefix and suffix).
    pub lcs_work_limit: usize,
    pub on_limit_exceeded: LimitBehavior,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            unified: false,
            unified_context: None,
            context_diff: false,
            context_lines: None,
            brief: false,
            ignore_case: false,
            ignore_whitespace: false,
            side_by_side: false,
            recursive: false,
            alignment: AlignmentMode::Lcs,
            lcs_work_limit: 10_000_000,
            on_limit_exceeded: LimitBehavior::FallbackToPositional,
        }
    }
}

impl DiffConfig {
    /// Hunk context width used when no explicit width was given.
    pub const DEFAULT_CONTEXT_LINES: u32 = 3;

    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder {
            inner: DiffConfig::default(),
        }
    }

    pub fn unified_context_lines(&self) -> u32 {
        self.unified_context.unwrap_or(Self::DEFAULT_CONTEXT_LINES)
    }

    pub fn context_diff_lines(&self) -> u32 {
        self.context_lines.unwrap_or(Self::DEFAULT_CONTEXT_LINES)
    }

    /// Resolves the mutually-non-exclusive format flags by fixed priority:
    /// unified, then side-by-side, then context, then normal. An explicit
    /// width implies its mode even without the boolean flag.
    pub fn output_format(&self) -> OutputFormat {
        if self.unified || self.unified_context.is_some() {
            OutputFormat::Unified
        } else if self.side_by_side {
            OutputFormat::SideBySide
        } else if self.context_diff || self.context_lines.is_some() {
            OutputFormat::Context
        } else {
            OutputFormat::Normal
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lcs_work_limit == 0 {
            return Err(ConfigError::NonPositiveLimit {
                field: "lcs_work_limit",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NonPositiveLimit { field: &'static str },
}

#[derive(Debug, Clone, Default)]
pub struct DiffConfigBuilder {
    inner: DiffConfig,
}

impl DiffConfigBuilder {
    pub fn new() -> Self {
        DiffConfig::builder()
    }

    pub fn unified(mut self, value: bool) -> Self {
        self.inner.unified = value;
        self
    }

    pub fn unified_context(mut self, value: u32) -> Self {
        self.inner.unified_context = Some(value);
        self
    }

    pub fn context_diff(mut self, value: bool) -> Self {
        self.inner.context_diff = value;
        self
    }

    pub fn context_lines(mut self, value: u32) -> Self {
        self.inner.context_lines = Some(value);
        self
    }

    pub fn brief(mut self, value: bool) -> Self {
        self.inner.brief = value;
        self
    }

    pub fn ignore_case(mut self, value: bool) -> Self {
        self.inner.ignore_case = value;
        self
    }

    pub fn ignore_whitespace(mut self, value: bool) -> Self {
        self.inner.ignore_whitespace = value;
        self
    }

    pub fn side_by_side(mut self, value: bool) -> Self {
        self.inner.side_by_side = value;
        self
    }

    pub fn recursive(mut self, value: bool) -> Self {
        self.inner.recursive = value;
        self
    }

    pub fn alignment(mut self, value: AlignmentMode) -> Self {
        self.inner.alignment = value;
        self
    }

    pub fn lcs_work_limit(mut self, value: usize) -> Self {
        self.inner.lcs_work_limit = value;
        self
    }

    pub fn on_limit_exceeded(mut self, value: LimitBehavior) -> Self {
        self.inner.on_limit_exceeded = value;
        self
    }

    pub fn build(self) -> Result<DiffConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
