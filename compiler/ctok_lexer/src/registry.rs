//! Ordered, precompiled rule registry.
//!
//! Every rule's pattern is compiled exactly once, here. Scanners borrow the
//! registry and reuse the compiled matchers at every position, so a single
//! registry can drive any number of scanners, including scanners on other
//! threads when the matcher type is `Sync`.
//!
//! Registration order is priority order: when two rules match the same
//! length, the one registered first wins.

use std::fmt;

use ctok_pattern::{PatternCompiler, PatternConfig, RegexCompiler};
use rustc_hash::FxHashMap;

use crate::{InvalidPatternError, Rule, RuleIndex, ScanConfig, Scanner};

/// Ordered rules with one compiled matcher per rule.
pub struct Registry<C: PatternCompiler = RegexCompiler> {
    rules: Vec<Rule>,
    /// `matchers[i]` is the compiled form of `rules[i].pattern()`.
    matchers: Vec<C::Matcher>,
    /// First index registered under each name.
    by_name: FxHashMap<String, RuleIndex>,
}

impl Registry {
    /// Compile `rules` with the default regex engine.
    pub fn new<I>(rules: I) -> Result<Self, InvalidPatternError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        Self::with_compiler(&RegexCompiler::default(), rules)
    }

    /// Compile `rules` with the default regex engine and custom options.
    pub fn with_config<I>(config: PatternConfig, rules: I) -> Result<Self, InvalidPatternError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        Self::with_compiler(&RegexCompiler::new(config), rules)
    }

    /// Compile `(name, pattern)` pairs with the default regex engine.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, InvalidPatternError> {
        Self::new(pairs.iter().copied())
    }

    /// Name equality between two rules. See [`Rule::equals`].
    pub fn equals(a: &Rule, b: &Rule) -> bool {
        Rule::equals(a, b)
    }
}

impl<C: PatternCompiler> Registry<C> {
    /// Compile `rules` with `compiler`.
    ///
    /// Fails on the first rule whose pattern does not compile, naming its
    /// index.
    #[tracing::instrument(level = "debug", skip_all, fields(rules = tracing::field::Empty))]
    pub fn with_compiler<I>(compiler: &C, rules: I) -> Result<Self, InvalidPatternError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let rules: Vec<Rule> = rules.into_iter().map(Into::into).collect();
        tracing::Span::current().record("rules", rules.len());
        let mut matchers = Vec::with_capacity(rules.len());
        let mut by_name = FxHashMap::default();

        for (index, rule) in rules.iter().enumerate() {
            let rule_index = RuleIndex(index);
            let matcher = compiler.compile(rule.pattern()).map_err(|err| {
                tracing::debug!(%rule_index, name = rule.name(), "pattern rejected");
                InvalidPatternError {
                    rule_index,
                    name: rule.name().to_owned(),
                    detail: err.detail,
                }
            })?;
            matchers.push(matcher);
            by_name.entry(rule.name().to_owned()).or_insert(rule_index);
        }

        tracing::debug!("registry compiled");
        Ok(Registry {
            rules,
            matchers,
            by_name,
        })
    }

    /// The rule at `index`.
    #[inline]
    pub fn get(&self, index: RuleIndex) -> Option<&Rule> {
        self.rules.get(index.0)
    }

    /// Name of the rule at `index`.
    pub fn name_of(&self, index: RuleIndex) -> Option<&str> {
        self.get(index).map(Rule::name)
    }

    /// Number of registered rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in registration (priority) order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleIndex, &Rule)> + '_ {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleIndex(index), rule))
    }

    /// Index of the first rule registered under `name`.
    pub fn index_of(&self, name: &str) -> Option<RuleIndex> {
        self.by_name.get(name).copied()
    }

    /// Start scanning `source` from the beginning.
    pub fn scanner<'r, 's>(&'r self, source: &'s str) -> Scanner<'r, 's, C> {
        Scanner::new(self, source)
    }

    /// Start scanning `source` with explicit scan options.
    pub fn scanner_with<'r, 's>(
        &'r self,
        source: &'s str,
        config: ScanConfig,
    ) -> Scanner<'r, 's, C> {
        Scanner::with_config(self, source, config)
    }

    /// Compiled matchers paired with their rule index, in priority order.
    pub(crate) fn matchers(&self) -> impl Iterator<Item = (RuleIndex, &C::Matcher)> + '_ {
        self.matchers
            .iter()
            .enumerate()
            .map(|(index, matcher)| (RuleIndex(index), matcher))
    }
}

impl<C: PatternCompiler> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
