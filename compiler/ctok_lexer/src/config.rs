//! Scan-time options.

/// What a scanner does when a rule's matcher exceeds its budget.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum BudgetPolicy {
    /// Log a warning and treat the rule as non-matching at that position.
    #[default]
    TreatAsNoMatch,
    /// Stop and report a [`MatchTimeoutError`](crate::MatchTimeoutError).
    Fail,
}

/// Configuration for a [`Scanner`](crate::Scanner).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ScanConfig {
    /// Reaction to a matcher giving up. Defaults to
    /// [`BudgetPolicy::TreatAsNoMatch`].
    pub on_budget_exceeded: BudgetPolicy,
}

impl ScanConfig {
    /// Config that fails the scan as soon as any matcher gives up.
    pub fn strict() -> Self {
        ScanConfig {
            on_budget_exceeded: BudgetPolicy::Fail,
        }
    }
}
