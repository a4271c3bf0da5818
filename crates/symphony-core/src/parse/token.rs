// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Token types for Symphony lexical analysis.
//!
//! Symphony's token set is small and closed: a handful of keywords
//! (tempo, duration codes, rest codes, scale names), note spellings,
//! integers, and three pieces of punctuation. Several lexical classes
//! overlap textually — `qn` (duration) vs `qr` (rest), and scale
//! keywords appearing where a duration could — which is why the lexer
//! matches full keyword codes rather than single-character prefixes.

use ecow::EcoString;

use super::Span;

/// The kind of token, not including source location.
///
/// Tokens are cheap to clone: string data uses [`EcoString`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A note spelling: letter A–G, optional `#`/`b`, octave digit.
    /// Examples: `C4`, `C#4`, `Bb3`.
    Note(EcoString),

    /// A duration code: `wn`, `hn`, `qn`, `en`, or `sn`.
    Duration(EcoString),

    /// A rest code: `wr`, `hr`, `qr`, `er`, or `sr`.
    Rest(EcoString),

    /// A scale type keyword: `maj` or `min`.
    ScaleType(EcoString),

    /// A scale extension keyword: `pent` or `chrom`.
    ScaleExtension(EcoString),

    /// The `tempo` keyword.
    Tempo,

    /// An integer literal, e.g. the BPM value in `tempo=120`.
    Number(u32),

    /// One or more consecutive `\n` characters, collapsed into a
    /// single token.
    Newline,

    /// `=`
    Equals,

    /// `[` (chord start)
    LBracket,

    /// `]` (chord end)
    RBracket,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this token separates elements (newline or
    /// end of input).
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Self::Newline | Self::Eof)
    }

    /// Returns the literal text if this token carries some.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Note(s)
            | Self::Duration(s)
            | Self::Rest(s)
            | Self::ScaleType(s)
            | Self::ScaleExtension(s) => Some(s),
            Self::Tempo
            | Self::Number(_)
            | Self::Newline
            | Self::Equals
            | Self::LBracket
            | Self::RBracket
            | Self::Eof => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note(s)
            | Self::Duration(s)
            | Self::Rest(s)
            | Self::ScaleType(s)
            | Self::ScaleExtension(s) => write!(f, "'{s}'"),
            Self::Tempo => write!(f, "'tempo'"),
            Self::Number(n) => write!(f, "'{n}'"),
            Self::Newline => write!(f, "newline"),
            Self::Equals => write!(f, "'='"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its source location.
///
/// The 1-based source line is tracked alongside the byte span because
/// every user-facing Symphony diagnostic reports line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    line: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Self { kind, span, line }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the 1-based source line this token starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}
