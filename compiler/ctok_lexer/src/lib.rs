//! Longest-match lexical scanner driven by an ordered list of named rules.
//!
//! # Architecture
//!
//! ```text
//! [(name, pattern)] ──► Registry (compiles every pattern once)
//!                          │ borrowed
//!              source ──► Scanner ──advance()──► Matched | Skipped | EndOfInput
//! ```
//!
//! - [`Rule`] / [`RuleIndex`]: a named pattern and its stable position.
//! - [`Registry`]: ordered rules plus their compiled matchers. Order is
//!   tie-break priority.
//! - [`Scanner`]: the pull-based state machine. See the [`scanner`] module
//!   docs for the selection algorithm.
//! - [`Token`]: one scan step's output.
//!
//! Pattern matching itself is delegated to [`ctok_pattern`].
//!
//! # Usage
//!
//! ```
//! use ctok_lexer::{Registry, Token};
//!
//! let registry = Registry::from_pairs(&[
//!     ("NUMBER", "[0-9]+"),
//!     ("IDENTIFIER", "[a-zA-Z_][a-zA-Z0-9_]*"),
//!     ("SPACE", "[ \t\n]+"),
//! ])?;
//!
//! let mut scanner = registry.scanner("foo 123");
//! loop {
//!     match scanner.advance()? {
//!         Token::Matched { rule, text, .. } => {
//!             println!("{}: '{text}'", registry.name_of(rule).unwrap_or("?"));
//!         }
//!         Token::Skipped { position, ch } => eprintln!("skipped {ch:?} at {position}"),
//!         Token::EndOfInput => break,
//!     }
//! }
//! # Ok::<(), ctok_lexer::LexError>(())
//! ```

mod config;
mod error;
mod ignore;
mod registry;
mod rule;
pub mod scanner;
mod token;
mod tokenize;

pub use config::{BudgetPolicy, ScanConfig};
pub use ctok_pattern::{PatternConfig, RegexCompiler};
pub use error::{InvalidPatternError, LexError, MatchTimeoutError, UnknownRuleError};
pub use ignore::IgnoreList;
pub use registry::Registry;
pub use rule::{Rule, RuleIndex};
pub use scanner::{Scanner, Tokens};
pub use token::Token;
pub use tokenize::{tokenize, tokenize_rules};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call has an effect, and only
/// when `RUST_LOG` is set (e.g. `RUST_LOG=ctok_lexer=trace` logs every token).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
