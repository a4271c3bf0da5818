// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Symphony source code.
//!
//! The grammar is LL(1) at the element level: after a NOTE token, the
//! next token decides between a plain note (DURATION) and a scale
//! (SCALE_TYPE); a LBRACKET opens a chord; a REST stands alone. There
//! is no backtracking.
//!
//! The input language is newline-delimited: the tempo clause and each
//! element must end at a newline or at end of input, so stray tokens
//! on the same line are rejected rather than silently ignored.
//! NEWLINE tokens are skipped freely *between* elements.
//!
//! Unlike IDE-oriented parsers that recover and collect diagnostics,
//! this parser fails fast: a compilation either yields a complete
//! [`Composition`] or exactly one [`ParseError`].
//!
//! # Example
//!
//! ```
//! use symphony_core::parse::{tokenize, Parser};
//!
//! let tokens = tokenize("tempo=120\nC4 qn\n").unwrap();
//! let composition = Parser::new(tokens).parse().unwrap();
//! assert_eq!(composition.tempo, 120);
//! assert_eq!(composition.elements.len(), 1);
//! ```

use ecow::EcoString;

use crate::ast::{Composition, MusicElement, ScaleSpec};

use super::{ParseError, Span, Token, TokenKind};

/// A parser over a token stream produced by the lexer.
///
/// Each instance owns its own cursor; independent compilations can run
/// concurrently.
#[derive(Debug)]
pub struct Parser {
    /// The tokens being parsed. Always ends with an EOF token.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    ///
    /// An EOF token is appended if the stream lacks one, so the parser
    /// is total over any token vector.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let (end, line) = tokens
                .last()
                .map_or((0, 1), |t| (t.span().end(), t.line()));
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), line));
        }
        Self { tokens, current: 0 }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    /// Returns the current token.
    fn current_token(&self) -> &Token {
        // `current` never passes the EOF index.
        &self.tokens[self.current]
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Advances past the current token. EOF is sticky.
    fn advance(&mut self) {
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
    }

    /// Skips any newline tokens at the current position.
    fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    /// Builds a syntax error naming the current token.
    fn error(&self, message: impl Into<EcoString>) -> ParseError {
        let token = self.current_token();
        ParseError::new(
            message,
            token.kind().to_string(),
            token.line(),
            token.span(),
        )
    }

    /// Requires the current token to be a newline or end of input,
    /// consuming the newline.
    fn expect_boundary(&mut self, context: &str) -> Result<(), ParseError> {
        match self.current_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.error(format!("expected a newline after {context}"))),
        }
    }

    // ========================================================================
    // Grammar productions
    // ========================================================================

    /// Parses the token stream into a [`Composition`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for the first unexpected token or for
    /// premature end of input.
    pub fn parse(mut self) -> Result<Composition, ParseError> {
        self.skip_newlines();
        let tempo = self.parse_tempo_clause()?;

        let mut elements = Vec::new();
        loop {
            self.skip_newlines();
            if self.current_kind().is_eof() {
                break;
            }
            let element = self.parse_element()?;
            self.expect_boundary("an element")?;
            elements.push(element);
        }

        Ok(Composition::new(tempo, elements))
    }

    /// `"tempo" "=" NUMBER` — mandatory, exactly once, first.
    fn parse_tempo_clause(&mut self) -> Result<u32, ParseError> {
        if !matches!(self.current_kind(), TokenKind::Tempo) {
            return Err(self.error("expected the composition to start with 'tempo = <bpm>'"));
        }
        self.advance();

        if !matches!(self.current_kind(), TokenKind::Equals) {
            return Err(self.error("expected '=' after 'tempo'"));
        }
        self.advance();

        let TokenKind::Number(tempo) = *self.current_kind() else {
            return Err(self.error("expected a tempo value in beats per minute"));
        };
        self.advance();

        self.expect_boundary("the tempo clause")?;
        Ok(tempo)
    }

    /// `element := note | scale | chord | rest`
    fn parse_element(&mut self) -> Result<MusicElement, ParseError> {
        match self.current_kind() {
            TokenKind::Note(_) => self.parse_note_or_scale(),
            TokenKind::LBracket => self.parse_chord(),
            TokenKind::Rest(code) => {
                let duration = code.clone();
                self.advance();
                Ok(MusicElement::Rest { duration })
            }
            TokenKind::Tempo => {
                Err(self.error("'tempo' may only appear once, at the start of the composition"))
            }
            _ => Err(self.error("expected a note, scale, chord, or rest")),
        }
    }

    /// `note := NOTE DURATION` or `scale := NOTE SCALE_TYPE [SCALE_EXTENSION]`,
    /// decided by the token after the NOTE.
    fn parse_note_or_scale(&mut self) -> Result<MusicElement, ParseError> {
        let TokenKind::Note(pitch) = self.current_kind().clone() else {
            return Err(self.error("expected a note"));
        };
        self.advance();

        match self.current_kind().clone() {
            TokenKind::Duration(duration) => {
                self.advance();
                Ok(MusicElement::Note { pitch, duration })
            }
            TokenKind::ScaleType(kind) => {
                self.advance();
                let extension = match self.current_kind() {
                    TokenKind::ScaleExtension(ext) => {
                        let ext = ext.clone();
                        self.advance();
                        Some(ext)
                    }
                    _ => None,
                };
                Ok(MusicElement::Scale(ScaleSpec::new(pitch, kind, extension)))
            }
            _ => Err(self.error("expected a duration or scale type after a note")),
        }
    }

    /// `chord := "[" NOTE+ "]" DURATION`
    fn parse_chord(&mut self) -> Result<MusicElement, ParseError> {
        self.advance(); // [

        let mut pitches = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::Note(pitch) => {
                    pitches.push(pitch.clone());
                    self.advance();
                }
                TokenKind::RBracket => {
                    if pitches.is_empty() {
                        return Err(self.error("expected at least one note inside a chord"));
                    }
                    self.advance();
                    break;
                }
                _ => return Err(self.error("expected a note or ']' inside a chord")),
            }
        }

        let TokenKind::Duration(duration) = self.current_kind().clone() else {
            return Err(self.error("expected a duration after a chord"));
        };
        self.advance();

        Ok(MusicElement::Chord { pitches, duration })
    }
}

/// Parses a token stream in one call.
///
/// # Errors
///
/// Returns a [`ParseError`] for the first syntax error.
pub fn parse(tokens: Vec<Token>) -> Result<Composition, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tokenize;

    fn parse_source(source: &str) -> Result<Composition, ParseError> {
        parse(tokenize(source).unwrap())
    }

    #[test]
    fn parse_basic_note() {
        let composition = parse_source("tempo=120\nC4 qn\n").unwrap();
        assert_eq!(composition.tempo, 120);
        assert_eq!(
            composition.elements,
            vec![MusicElement::Note {
                pitch: "C4".into(),
                duration: "qn".into(),
            }]
        );
    }

    #[test]
    fn parse_preserves_source_order() {
        let composition = parse_source("tempo=120\nC4 qn\nD4 hn\n").unwrap();
        assert_eq!(
            composition.elements,
            vec![
                MusicElement::Note {
                    pitch: "C4".into(),
                    duration: "qn".into(),
                },
                MusicElement::Note {
                    pitch: "D4".into(),
                    duration: "hn".into(),
                },
            ]
        );
    }

    #[test]
    fn parse_scale_without_extension() {
        let composition = parse_source("tempo=120\nC4 maj\n").unwrap();
        assert_eq!(
            composition.elements,
            vec![MusicElement::Scale(ScaleSpec::new("C4", "maj", None))]
        );
    }

    #[test]
    fn parse_scale_with_extension() {
        let composition = parse_source("tempo=120\nA4 min pent\n").unwrap();
        assert_eq!(
            composition.elements,
            vec![MusicElement::Scale(ScaleSpec::new(
                "A4",
                "min",
                Some("pent".into())
            ))]
        );
    }

    #[test]
    fn parse_chord() {
        let composition = parse_source("tempo=120\n[C4 E4 G4] wn\n").unwrap();
        assert_eq!(
            composition.elements,
            vec![MusicElement::Chord {
                pitches: vec!["C4".into(), "E4".into(), "G4".into()],
                duration: "wn".into(),
            }]
        );
    }

    #[test]
    fn parse_rest() {
        let composition = parse_source("tempo=120\nqr\n").unwrap();
        assert_eq!(
            composition.elements,
            vec![MusicElement::Rest {
                duration: "qr".into(),
            }]
        );
    }

    #[test]
    fn parse_mixed_elements() {
        let source = "tempo=120\nC4 qn\nD4 hn\nqr\n[E4 G4] wn\nC4 maj pent\n";
        let composition = parse_source(source).unwrap();
        assert_eq!(composition.elements.len(), 5);
    }

    #[test]
    fn empty_composition_after_tempo_is_valid() {
        let composition = parse_source("tempo=90\n").unwrap();
        assert_eq!(composition.tempo, 90);
        assert!(composition.elements.is_empty());
    }

    #[test]
    fn leading_and_extra_newlines_are_ignored() {
        let composition = parse_source("\n\ntempo=120\n\n\nC4 qn\n\n").unwrap();
        assert_eq!(composition.elements.len(), 1);
    }

    #[test]
    fn missing_tempo_is_an_error() {
        let err = parse_source("C4 qn\n").unwrap_err();
        assert!(err.message.contains("tempo"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn misplaced_tempo_is_an_error() {
        let err = parse_source("tempo=120\nC4 qn\ntempo=90\n").unwrap_err();
        assert!(err.message.contains("once"));
        assert_eq!(err.line, 3);
    }

    #[test]
    fn trailing_token_after_note_is_an_error() {
        let err = parse_source("tempo=120\nC4 qn D4\n").unwrap_err();
        assert_eq!(err.found, "'D4'");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn trailing_token_after_tempo_is_an_error() {
        let err = parse_source("tempo=120 C4 qn\n").unwrap_err();
        assert_eq!(err.found, "'C4'");
    }

    #[test]
    fn note_without_duration_is_an_error() {
        let err = parse_source("tempo=120\nC4\n").unwrap_err();
        assert!(err.message.contains("duration or scale type"));
    }

    #[test]
    fn empty_chord_is_an_error() {
        let err = parse_source("tempo=120\n[] qn\n").unwrap_err();
        assert!(err.message.contains("at least one note"));
    }

    #[test]
    fn chord_without_duration_is_an_error() {
        let err = parse_source("tempo=120\n[C4 E4]\n").unwrap_err();
        assert!(err.message.contains("duration after a chord"));
    }

    #[test]
    fn unclosed_chord_reports_end_of_input() {
        let err = parse_source("tempo=120\n[C4 E4").unwrap_err();
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn premature_end_of_input_in_tempo_clause() {
        let err = parse_source("tempo=").unwrap_err();
        assert_eq!(err.found, "end of input");
        assert!(err.message.contains("tempo value"));
    }

    #[test]
    fn scale_does_not_take_a_duration() {
        // Scales have an implicit quarter-note duration; a trailing
        // duration code is a stray token.
        let err = parse_source("tempo=120\nC4 maj en\n").unwrap_err();
        assert_eq!(err.found, "'en'");
    }

    #[test]
    fn number_as_element_is_an_error() {
        let err = parse_source("tempo=120\n42\n").unwrap_err();
        assert!(err.message.contains("note, scale, chord, or rest"));
    }
}
