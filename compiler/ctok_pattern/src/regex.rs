//! Default matching engine backed by `regex-automata`.
//!
//! The meta regex picks among lazy DFA, one-pass DFA, bounded backtracker
//! and PikeVM internally. All of them run in time linear in the subject, so
//! a hostile pattern cannot stall the scanner; [`RegexMatcher`] never
//! reports [`BudgetExceeded`].
//!
//! # Anchoring
//!
//! The subject is sliced at the offset and searched with
//! [`Anchored::Yes`]. Slicing keeps a leading `^` meaningful (it asserts
//! "at the scan position"), and the anchored search makes `^` optional.

use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};

use crate::{BudgetExceeded, MatchResult, Matcher, PatternCompiler, PatternError};

/// Compilation options for [`RegexCompiler`].
///
/// Applies to every pattern compiled by the same compiler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PatternConfig {
    /// Match letters regardless of case (`(?i)` for every pattern).
    pub case_insensitive: bool,
    /// `^`/`$` also match at line boundaries (`(?m)`).
    ///
    /// With this set, `[a-z]+$` matches `ab` in `"ab\ncd"`; without it, `$`
    /// only matches at the end of the source.
    pub multi_line: bool,
    /// `.` also matches `\n` (`(?s)`).
    pub dot_matches_new_line: bool,
    /// Unicode-aware classes such as `\w` and `\d`. Defaults to `true`.
    ///
    /// When `false`, classes are ASCII-only. Matches must still end on a
    /// character boundary, so anything that can match a lone non-ASCII byte
    /// (a bare `.`, or a negated class like `[^\n]`) fails to compile.
    pub unicode: bool,
    /// Upper bound, in bytes, on the compiled form of a single pattern.
    /// `None` keeps the engine's default limit.
    pub size_limit: Option<usize>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            unicode: true,
            size_limit: None,
        }
    }
}

impl PatternConfig {
    /// Config with case-insensitive matching enabled.
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            ..Default::default()
        }
    }

    /// Config with a compiled-size budget per pattern.
    pub fn with_size_limit(limit: usize) -> Self {
        Self {
            size_limit: Some(limit),
            ..Default::default()
        }
    }

    fn syntax(&self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .unicode(self.unicode)
    }
}

/// Compiles patterns into [`RegexMatcher`]s.
#[derive(Clone, Debug, Default)]
pub struct RegexCompiler {
    config: PatternConfig,
}

impl RegexCompiler {
    /// Create a compiler with the given options.
    pub fn new(config: PatternConfig) -> Self {
        RegexCompiler { config }
    }

    /// Options used by this compiler.
    pub fn config(&self) -> &PatternConfig {
        &self.config
    }
}

impl PatternCompiler for RegexCompiler {
    type Matcher = RegexMatcher;

    fn compile(&self, pattern: &str) -> Result<RegexMatcher, PatternError> {
        let mut meta = Regex::config();
        if let Some(limit) = self.config.size_limit {
            meta = meta.nfa_size_limit(Some(limit));
        }
        let regex = Regex::builder()
            .configure(meta)
            .syntax(self.config.syntax())
            .build(pattern)
            .map_err(|err| PatternError::new(pattern, describe(&err)))?;
        Ok(RegexMatcher { regex })
    }
}

/// Render a build error with the most specific detail available.
///
/// The meta error's own `Display` only says which pattern failed; the
/// syntax error underneath carries the position and reason.
fn describe(err: &BuildError) -> String {
    if let Some(syntax) = err.syntax_error() {
        return syntax.to_string();
    }
    if let Some(limit) = err.size_limit() {
        return format!("compiled pattern exceeds the size limit of {limit} bytes");
    }
    err.to_string()
}

/// A compiled regex, safe to share across threads.
#[derive(Clone, Debug)]
pub struct RegexMatcher {
    regex: Regex,
}

impl Matcher for RegexMatcher {
    #[inline]
    fn try_match(&self, subject: &str, offset: usize) -> Result<MatchResult, BudgetExceeded> {
        let Some(rest) = subject.get(offset..) else {
            return Ok(MatchResult::NoMatch);
        };
        let input = Input::new(rest).anchored(Anchored::Yes);
        Ok(match self.regex.search(&input) {
            Some(m) => MatchResult::Matched { len: m.len() },
            None => MatchResult::NoMatch,
        })
    }
}

/// Escape `literal` so it matches itself and nothing else.
///
/// ```
/// assert_eq!(ctok_pattern::escape("a+b"), r"a\+b");
/// ```
pub fn escape(literal: &str) -> String {
    regex_syntax::escape(literal)
}
