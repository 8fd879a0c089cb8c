//! One-shot helpers that drain a scanner into a vector.

use ctok_pattern::PatternCompiler;

use crate::{LexError, MatchTimeoutError, Registry, Token};

/// Scan all of `source`, returning every matched and skipped token.
///
/// The trailing [`Token::EndOfInput`] is not included.
pub fn tokenize<C: PatternCompiler>(
    registry: &Registry<C>,
    source: &str,
) -> Result<Vec<Token>, MatchTimeoutError> {
    let mut scanner = registry.scanner(source);
    scanner.tokens().collect()
}

/// Build a registry from `(name, pattern)` pairs and scan all of `source`.
pub fn tokenize_rules(rules: &[(&str, &str)], source: &str) -> Result<Vec<Token>, LexError> {
    let registry = Registry::from_pairs(rules)?;
    Ok(tokenize(&registry, source)?)
}
