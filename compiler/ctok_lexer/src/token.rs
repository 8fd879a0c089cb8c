//! Scanner output.

use std::ops::Range;

use crate::RuleIndex;

/// One step of scanner output.
///
/// Unmatched input ([`Token::Skipped`]) and exhausted input
/// ([`Token::EndOfInput`]) are separate variants: a pull loop keeps going
/// on the former and stops on the latter.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// A rule matched `len > 0` bytes at `start`.
    Matched {
        rule: RuleIndex,
        /// Owned copy of `source[start..start + len]`.
        text: String,
        start: usize,
        len: usize,
    },
    /// No rule matched at `position`; the character `ch` was consumed.
    Skipped { position: usize, ch: char },
    /// The source is exhausted. Returned again on every later call.
    EndOfInput,
}

impl Token {
    /// Returns `true` for [`Token::EndOfInput`].
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Token::EndOfInput)
    }

    /// Returns `true` for [`Token::Skipped`].
    #[inline]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Token::Skipped { .. })
    }

    /// Index of the matching rule, for matched tokens.
    pub fn rule(&self) -> Option<RuleIndex> {
        match self {
            Token::Matched { rule, .. } => Some(*rule),
            Token::Skipped { .. } | Token::EndOfInput => None,
        }
    }

    /// Matched text, for matched tokens.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Matched { text, .. } => Some(text),
            Token::Skipped { .. } | Token::EndOfInput => None,
        }
    }

    /// Byte range of the input this token consumed.
    ///
    /// `None` for [`Token::EndOfInput`], which consumes nothing.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Token::Matched { start, len, .. } => Some(*start..*start + *len),
            Token::Skipped { position, ch } => Some(*position..*position + ch.len_utf8()),
            Token::EndOfInput => None,
        }
    }
}
