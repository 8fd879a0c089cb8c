//! Pattern compilation and matching errors.

use thiserror::Error;

/// A pattern could not be compiled.
///
/// Raised once, when the pattern is compiled, never at match time.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("invalid pattern `{pattern}`: {detail}")]
pub struct PatternError {
    /// The pattern text as written by the caller.
    pub pattern: String,
    /// Engine-provided description of what is wrong.
    pub detail: String,
}

impl PatternError {
    /// Create a new pattern error.
    pub fn new(pattern: impl Into<String>, detail: impl Into<String>) -> Self {
        PatternError {
            pattern: pattern.into(),
            detail: detail.into(),
        }
    }
}

/// A matcher gave up before deciding whether its pattern matches.
///
/// Engines with a step or time budget report this instead of hanging. The
/// default regex engine is linear-time and never produces it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Error)]
#[error("match budget exceeded")]
pub struct BudgetExceeded;
