//! Anchored pattern matching for the ctok scanner.
//!
//! This crate is the matching capability the scanner is built on. It knows
//! nothing about rules, registries, or tokens: it compiles a pattern once and
//! then answers "how long is the match that starts exactly here?".
//!
//! # Architecture
//!
//! ```text
//! pattern text ──► PatternCompiler::compile ──► Matcher (compiled, reusable)
//!                                                  │
//!                    subject + offset ───────────► try_match ──► MatchResult
//! ```
//!
//! The default engine ([`RegexCompiler`]) wraps `regex-automata`'s meta
//! regex, which runs in time linear in the subject. Anchoring is enforced by
//! the engine, not by pattern syntax, so `[0-9]+` and `^[0-9]+` behave the
//! same.
//!
//! # Usage
//!
//! ```
//! use ctok_pattern::{Matcher, MatchResult, PatternCompiler, RegexCompiler};
//!
//! let number = RegexCompiler::default().compile("[0-9]+")?;
//! assert_eq!(number.try_match("ab123", 2), Ok(MatchResult::Matched { len: 3 }));
//! assert_eq!(number.try_match("ab123", 0), Ok(MatchResult::NoMatch));
//! # Ok::<(), ctok_pattern::PatternError>(())
//! ```

mod error;
mod matcher;
mod regex;

pub use error::{BudgetExceeded, PatternError};
pub use matcher::{MatchResult, Matcher, PatternCompiler};
pub use regex::{escape, PatternConfig, RegexCompiler, RegexMatcher};
