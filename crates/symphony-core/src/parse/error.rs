// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the lexer and parser.
//!
//! Errors carry byte-offset [`Span`]s for [`miette`] source labels and
//! 1-based line numbers for plain-text reporting. Both stages fail on
//! the first error; there is no recovery or error collection.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error: a character that matches no token rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("illegal character '{character}' at line {line}")]
#[diagnostic(code(symphony::lex))]
pub struct LexError {
    /// The offending character.
    pub character: char,
    /// The 1-based source line the character appears on.
    pub line: u32,
    /// The source location of the character.
    #[label("this character is not part of the language")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(character: char, line: u32, span: Span) -> Self {
        Self {
            character,
            line,
            span,
        }
    }
}

/// A syntax error: an unexpected token or premature end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}, found {found} at line {line}")]
#[diagnostic(code(symphony::parse))]
pub struct ParseError {
    /// What the parser expected, e.g. "expected a duration code".
    pub message: EcoString,
    /// Rendering of the offending token, or "end of input".
    pub found: EcoString,
    /// The 1-based source line of the offending token.
    pub line: u32,
    /// The source location of the offending token.
    #[label("unexpected")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(
        message: impl Into<EcoString>,
        found: impl Into<EcoString>,
        line: u32,
        span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            found: found.into(),
            line,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::new('$', 3, Span::new(10, 11));
        assert_eq!(err.to_string(), "illegal character '$' at line 3");
        assert_eq!(err.span, Span::new(10, 11));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::new("expected a duration code", "'maj'", 2, Span::new(13, 16));
        assert_eq!(
            err.to_string(),
            "expected a duration code, found 'maj' at line 2"
        );
    }

    #[test]
    fn parse_error_at_end_of_input() {
        let err = ParseError::new("expected a duration code", "end of input", 4, Span::new(20, 20));
        assert_eq!(
            err.to_string(),
            "expected a duration code, found end of input at line 4"
        );
    }
}
