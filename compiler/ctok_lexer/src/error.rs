//! Scanner error taxonomy.
//!
//! - [`InvalidPatternError`]: a rule failed to compile. Fatal to registry
//!   construction; no partial registry is ever returned.
//! - [`MatchTimeoutError`]: a matcher exceeded its budget and the scan is
//!   configured to fail on that (see [`BudgetPolicy`](crate::BudgetPolicy)).
//! - [`UnknownRuleError`]: an ignore list named a rule the registry lacks.
//!
//! Unmatched input is *not* an error: it surfaces as
//! [`Token::Skipped`](crate::Token::Skipped).

use thiserror::Error;

use crate::RuleIndex;

/// A rule's pattern could not be compiled.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("rule {rule_index} (`{name}`) has an invalid pattern: {detail}")]
pub struct InvalidPatternError {
    /// Index the rule would have had in the registry.
    pub rule_index: RuleIndex,
    /// Name of the offending rule.
    pub name: String,
    /// Engine-provided reason.
    pub detail: String,
}

/// A rule's matcher gave up at a scan position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("rule {rule_index} exceeded its match budget at byte {position}")]
pub struct MatchTimeoutError {
    pub rule_index: RuleIndex,
    /// Scan position (byte offset) of the attempt.
    pub position: usize,
}

/// A rule name that is not registered.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("no rule named `{name}` is registered")]
pub struct UnknownRuleError {
    pub name: String,
}

/// Any error produced while building a registry or scanning with it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexError {
    #[error(transparent)]
    InvalidPattern(#[from] InvalidPatternError),
    #[error(transparent)]
    MatchTimeout(#[from] MatchTimeoutError),
    #[error(transparent)]
    UnknownRule(#[from] UnknownRuleError),
}
