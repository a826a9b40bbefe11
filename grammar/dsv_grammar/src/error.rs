//! Parse error types.
//!
//! Errors never abort a parse: the driver records them on the [`Tree`]
//! and wraps the offending input in an `ERROR` node.
//!
//! [`Tree`]: crate::Tree

use crate::span::Span;

/// A structural problem found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A field was followed by something other than a separator, a line
    /// terminator, or end of input.
    #[error("unexpected {found:?} at {span}: expected {expected:?}, a line terminator, or end of input")]
    UnexpectedCharacter {
        found: char,
        expected: char,
        span: Span,
    },
    /// A quoted field reached end of input without its closing quote.
    #[error("unterminated quoted field starting at {span}")]
    UnterminatedQuote { span: Span },
}

impl ParseError {
    /// Source range the error covers.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedCharacter { span, .. } | ParseError::UnterminatedQuote { span } => {
                *span
            }
        }
    }
}

/// Error when a foreign language object fails its type-tag check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("object is not a language: type tag {found} does not match {expected}")]
    TypeTagMismatch {
        expected: crate::language::TypeTag,
        found: crate::language::TypeTag,
    },
}
