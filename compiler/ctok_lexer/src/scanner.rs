//! Longest-match scanner over a borrowed registry and source.
//!
//! # Algorithm
//!
//! At each position every rule is tried in registry order, anchored at the
//! position. The longest non-empty match wins; on equal lengths the earlier
//! rule keeps the lead, because a candidate only replaces the current best
//! when it is strictly longer. Empty matches never win.
//!
//! - Winner found: emit [`Token::Matched`] and move past the match.
//! - No winner: emit [`Token::Skipped`] and move past one character.
//! - Already at the end: emit [`Token::EndOfInput`] and stay put.
//!
//! # State
//!
//! Two states: scanning (`position < source.len()`) and exhausted
//! (`position == source.len()`, terminal). Every call made while scanning
//! strictly increases `position`, so a pull loop always terminates.

use std::iter::FusedIterator;

use ctok_pattern::{Matcher, PatternCompiler, RegexCompiler};

use crate::{
    BudgetPolicy, IgnoreList, MatchTimeoutError, Registry, RuleIndex, ScanConfig, Token,
};

/// Pull-based scanner.
///
/// Borrows its registry and source for its whole lifetime and owns only the
/// scan position. Use one scanner per thread; the registry itself can be
/// shared.
#[derive(Debug)]
pub struct Scanner<'r, 's, C: PatternCompiler = RegexCompiler> {
    registry: &'r Registry<C>,
    source: &'s str,
    /// Byte offset of the next unscanned character.
    ///
    /// Invariant: `position <= source.len()` and on a char boundary.
    position: usize,
    config: ScanConfig,
}

impl<'r, 's, C: PatternCompiler> Scanner<'r, 's, C> {
    /// Create a scanner at the start of `source`.
    pub fn new(registry: &'r Registry<C>, source: &'s str) -> Self {
        Self::with_config(registry, source, ScanConfig::default())
    }

    /// Create a scanner with explicit options.
    pub fn with_config(registry: &'r Registry<C>, source: &'s str, config: ScanConfig) -> Self {
        Scanner {
            registry,
            source,
            position: 0,
            config,
        }
    }

    /// Produce the next token.
    ///
    /// Returns [`Token::EndOfInput`] once the source is exhausted, and keeps
    /// returning it on every later call without changing state.
    ///
    /// Errors only under [`BudgetPolicy::Fail`], in which case the position
    /// is left unchanged.
    pub fn advance(&mut self) -> Result<Token, MatchTimeoutError> {
        if self.is_exhausted() {
            tracing::debug!(position = self.position, "end of input");
            return Ok(Token::EndOfInput);
        }

        let start = self.position;
        let mut best_len = 0;
        let mut best_rule: Option<RuleIndex> = None;

        for (rule_index, matcher) in self.registry.matchers() {
            let len = match matcher.try_match(self.source, start) {
                Ok(result) => result.len().unwrap_or(0),
                Err(_) => self.budget_exceeded(rule_index, start)?,
            };
            // Strictly longer only: earlier rules win ties.
            if len > best_len && self.ends_in_source(start, len) {
                best_len = len;
                best_rule = Some(rule_index);
            }
        }

        let token = match best_rule {
            Some(rule) => {
                let end = start + best_len;
                self.position = end;
                Token::Matched {
                    rule,
                    text: self.source[start..end].to_owned(),
                    start,
                    len: best_len,
                }
            }
            None => {
                let Some(ch) = self.source[start..].chars().next() else {
                    return Ok(Token::EndOfInput);
                };
                self.position = start + ch.len_utf8();
                tracing::debug!(position = start, ?ch, "no rule matched, skipping");
                Token::Skipped {
                    position: start,
                    ch,
                }
            }
        };

        tracing::trace!(?token, "scanned");
        Ok(token)
    }

    /// Whether a match of `len` bytes at `start` ends on a char boundary
    /// inside the source.
    #[inline]
    fn ends_in_source(&self, start: usize, len: usize) -> bool {
        start
            .checked_add(len)
            .is_some_and(|end| self.source.is_char_boundary(end))
    }

    /// Apply the budget policy for a matcher that gave up.
    ///
    /// Returns the match length to use (always 0) or the error to raise.
    fn budget_exceeded(
        &self,
        rule_index: RuleIndex,
        position: usize,
    ) -> Result<usize, MatchTimeoutError> {
        match self.config.on_budget_exceeded {
            BudgetPolicy::TreatAsNoMatch => {
                tracing::warn!(
                    %rule_index,
                    rule = self.registry.name_of(rule_index),
                    position,
                    "match budget exceeded, treating rule as non-matching"
                );
                Ok(0)
            }
            BudgetPolicy::Fail => Err(MatchTimeoutError {
                rule_index,
                position,
            }),
        }
    }

    /// Iterate over tokens until the end of input.
    ///
    /// The iterator yields matched and skipped tokens and ends instead of
    /// yielding [`Token::EndOfInput`]. It also ends right after an error.
    pub fn tokens(&mut self) -> Tokens<'_, 'r, 's, C> {
        Tokens {
            scanner: self,
            ignore: None,
            done: false,
        }
    }

    /// Like [`tokens`](Self::tokens), but drops matches of ignored rules.
    ///
    /// Skipped input is still reported.
    pub fn significant_tokens<'a>(&'a mut self, ignore: &'a IgnoreList) -> Tokens<'a, 'r, 's, C> {
        Tokens {
            scanner: self,
            ignore: Some(ignore),
            done: false,
        }
    }

    /// Byte offset of the next unscanned character.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The full source being scanned.
    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The unscanned part of the source.
    #[inline]
    pub fn remaining(&self) -> &'s str {
        &self.source[self.position..]
    }

    /// Returns `true` once every byte of the source has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.source.len()
    }

    /// The registry this scanner draws rules from.
    #[inline]
    pub fn registry(&self) -> &'r Registry<C> {
        self.registry
    }

    #[inline]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }
}

/// Iterator returned by [`Scanner::tokens`] and
/// [`Scanner::significant_tokens`].
#[derive(Debug)]
pub struct Tokens<'a, 'r, 's, C: PatternCompiler = RegexCompiler> {
    scanner: &'a mut Scanner<'r, 's, C>,
    ignore: Option<&'a IgnoreList>,
    done: bool,
}

impl<C: PatternCompiler> Iterator for Tokens<'_, '_, '_, C> {
    type Item = Result<Token, MatchTimeoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.scanner.advance() {
                Ok(Token::EndOfInput) => self.done = true,
                Ok(token) if self.ignore.is_some_and(|ignore| ignore.contains(&token)) => {}
                Ok(token) => return Some(Ok(token)),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl<C: PatternCompiler> FusedIterator for Tokens<'_, '_, '_, C> {}

#[cfg(test)]
mod tests;
