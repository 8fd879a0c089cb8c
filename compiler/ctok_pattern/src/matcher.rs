//! The matcher seam: compile a pattern once, then run anchored matches.

use crate::{BudgetExceeded, PatternError};

/// Outcome of one anchored match attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MatchResult {
    /// The pattern does not match at the offset.
    NoMatch,
    /// The pattern matches `len` bytes starting at the offset.
    ///
    /// `len` may be zero when the pattern accepts empty text.
    Matched { len: usize },
}

impl MatchResult {
    /// Length of the match, if any.
    #[inline]
    pub fn len(self) -> Option<usize> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::Matched { len } => Some(len),
        }
    }

    /// Returns `true` for any match, including an empty one.
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }
}

/// A compiled pattern.
///
/// # Contract
///
/// `try_match` is anchored: a reported match starts exactly at `offset`.
/// `offset` is a byte offset into `subject`. An offset beyond the end of
/// `subject`, or one that does not fall on a char boundary, yields
/// [`MatchResult::NoMatch`]. Matches always end on a char boundary.
pub trait Matcher {
    /// Attempt an anchored match of this pattern at `offset`.
    fn try_match(&self, subject: &str, offset: usize) -> Result<MatchResult, BudgetExceeded>;
}

/// Turns pattern text into a reusable [`Matcher`].
///
/// Called exactly once per pattern; the result is reused for every match
/// attempt afterwards.
pub trait PatternCompiler {
    /// The compiled form produced by this compiler.
    type Matcher: Matcher;

    /// Compile `pattern`, reporting syntax or size errors.
    fn compile(&self, pattern: &str) -> Result<Self::Matcher, PatternError>;
}
