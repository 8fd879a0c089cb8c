//! Caller-side ignore lists (whitespace, comments, ...).

use ctok_pattern::PatternCompiler;
use rustc_hash::FxHashSet;

use crate::{Registry, RuleIndex, Token, UnknownRuleError};

/// Set of rules whose matches a consumer does not care about.
///
/// Built from rule names: every registered rule that [`equals`](crate::Rule::equals)
/// a listed name is included, so duplicates registered under one name are
/// all ignored together.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IgnoreList {
    rules: FxHashSet<RuleIndex>,
}

impl IgnoreList {
    /// Resolve `names` against `registry`.
    ///
    /// Fails on the first name with no registered rule.
    pub fn from_names<C: PatternCompiler>(
        registry: &Registry<C>,
        names: &[&str],
    ) -> Result<Self, UnknownRuleError> {
        let mut rules = FxHashSet::default();
        for &name in names {
            if registry.index_of(name).is_none() {
                return Err(UnknownRuleError {
                    name: name.to_owned(),
                });
            }
            rules.extend(
                registry
                    .iter()
                    .filter(|(_, rule)| rule.name() == name)
                    .map(|(index, _)| index),
            );
        }
        Ok(IgnoreList { rules })
    }

    /// Build from raw indices.
    pub fn from_indices(indices: impl IntoIterator<Item = RuleIndex>) -> Self {
        IgnoreList {
            rules: indices.into_iter().collect(),
        }
    }

    /// Returns `true` if `token` was matched by an ignored rule.
    pub fn contains(&self, token: &Token) -> bool {
        token.rule().is_some_and(|rule| self.contains_rule(rule))
    }

    #[inline]
    pub fn contains_rule(&self, rule: RuleIndex) -> bool {
        self.rules.contains(&rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
