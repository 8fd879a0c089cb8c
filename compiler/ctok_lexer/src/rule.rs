//! Named pattern rules and their stable indices.

use std::fmt;

/// A named pattern recognizing one class of token.
///
/// Rules are immutable once registered. Two rules are considered the same
/// kind of token when their names are equal (see [`Rule::equals`]); the
/// pattern plays no part in that comparison.
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    pattern: String,
}

impl Rule {
    /// Create a rule from a name and a regex pattern.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a rule that matches `text` literally.
    ///
    /// Regex metacharacters in `text` are escaped.
    pub fn literal(name: impl Into<String>, text: &str) -> Self {
        Rule::new(name, ctok_pattern::escape(text))
    }

    /// The rule's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's pattern text.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Name equality, used for ignore lists and deduplication.
    pub fn equals(a: &Rule, b: &Rule) -> bool {
        a.name == b.name
    }
}

impl<N: Into<String>, P: Into<String>> From<(N, P)> for Rule {
    fn from((name, pattern): (N, P)) -> Self {
        Rule::new(name, pattern)
    }
}

/// Position of a rule in its registry.
///
/// Indices never change after registration, so they identify the rule in
/// every token the registry's scanners produce. Lower indices win ties.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RuleIndex(pub(crate) usize);

impl RuleIndex {
    /// Create an index. Only meaningful for the registry it came from.
    #[inline]
    pub const fn new(index: usize) -> Self {
        RuleIndex(index)
    }

    /// The raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
