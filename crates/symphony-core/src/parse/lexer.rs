// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Symphony source code.
//!
//! The lexer is hand-written: Symphony's token classes overlap
//! textually (rest codes and duration codes differ only in their final
//! letter, scale keywords appear where a duration could), so keywords
//! are matched longest-first against a closed table rather than by
//! single-character dispatch or a regex union. This keeps matching
//! independent of rule declaration order.
//!
//! The lexer fails fast: the first character that matches no token
//! rule aborts with a [`LexError`] carrying the character and its
//! 1-based line.
//!
//! # Example
//!
//! ```
//! use symphony_core::parse::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("tempo=120").tokenize().unwrap();
//! assert!(matches!(tokens[0].kind(), TokenKind::Tempo));
//! assert!(matches!(tokens[1].kind(), TokenKind::Equals));
//! assert!(matches!(tokens[2].kind(), TokenKind::Number(120)));
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::{LexError, Span, Token, TokenKind};

/// Fixed keyword set, longest first so that longest-match wins.
///
/// No Symphony keyword is a prefix of another, but ordering by length
/// keeps the scan correct if one ever becomes one.
const KEYWORDS: &[&str] = &[
    "tempo", "chrom", "pent", "maj", "min", "wn", "hn", "qn", "en", "sn", "wr", "hr", "qr", "er",
    "sr",
];

/// Classifies a matched keyword into its token kind.
fn keyword_kind(keyword: &str) -> TokenKind {
    match keyword {
        "tempo" => TokenKind::Tempo,
        "wn" | "hn" | "qn" | "en" | "sn" => TokenKind::Duration(keyword.into()),
        "wr" | "hr" | "qr" | "er" | "sr" => TokenKind::Rest(keyword.into()),
        "maj" | "min" => TokenKind::ScaleType(keyword.into()),
        "pent" | "chrom" => TokenKind::ScaleExtension(keyword.into()),
        _ => unreachable!("keyword table and classifier are maintained together"),
    }
}

/// A lexer that tokenizes Symphony source code.
///
/// Each instance owns its own cursor and line counter; nothing is
/// shared between invocations, so independent compilations can run
/// concurrently.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based source line.
    line: u32,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("line", &self.line)
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "compositions over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// The unlexed remainder of the source.
    fn remaining(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Rejects the character at the current position.
    fn illegal_char(&mut self) -> LexError {
        let start = self.current_position();
        let c = self.advance().unwrap_or('\0');
        LexError::new(c, self.line, self.span_from(start))
    }

    /// Tokenizes the whole source, ending with an EOF token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for the first character that matches no
    /// token rule.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            // Space, tab, and CR are insignificant. CR is tolerated so
            // CRLF files lex the same as LF files.
            self.advance_while(|c| matches!(c, ' ' | '\t' | '\r'));

            let Some(c) = self.peek_char() else {
                let end = self.current_position();
                tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), self.line));
                return Ok(tokens);
            };

            match c {
                '#' => self.skip_comment(),
                '\n' => tokens.push(self.lex_newlines()),
                '=' => tokens.push(self.lex_single(TokenKind::Equals)),
                '[' => tokens.push(self.lex_single(TokenKind::LBracket)),
                ']' => tokens.push(self.lex_single(TokenKind::RBracket)),
                'A'..='G' => tokens.push(self.lex_note()?),
                'a'..='z' => tokens.push(self.lex_keyword()?),
                '0'..='9' => tokens.push(self.lex_number()?),
                _ => return Err(self.illegal_char()),
            }
        }
    }

    /// Skips a `#` comment through end of line, leaving the newline
    /// for the newline rule.
    fn skip_comment(&mut self) {
        self.advance_while(|c| c != '\n');
    }

    /// Lexes a run of one or more newlines as a single NEWLINE token,
    /// advancing the line counter once per newline consumed.
    fn lex_newlines(&mut self) -> Token {
        let start = self.current_position();
        let line = self.line;
        while self.peek_char() == Some('\n') {
            self.advance();
            self.line += 1;
        }
        Token::new(TokenKind::Newline, self.span_from(start), line)
    }

    /// Lexes a single-character token.
    fn lex_single(&mut self, kind: TokenKind) -> Token {
        let start = self.current_position();
        self.advance();
        Token::new(kind, self.span_from(start), self.line)
    }

    /// Lexes a note spelling: letter A–G, optional `#` or `b`
    /// accidental, and a required octave digit.
    ///
    /// An A–G letter that does not complete the pattern matches no
    /// other rule, so the letter itself is reported as illegal.
    fn lex_note(&mut self) -> Result<Token, LexError> {
        let rest = self.remaining().as_bytes();
        let mut len = 1;
        if matches!(rest.get(len), Some(b'#' | b'b')) {
            len += 1;
        }
        if !rest.get(len).is_some_and(u8::is_ascii_digit) {
            return Err(self.illegal_char());
        }
        len += 1;

        let start = self.current_position();
        for _ in 0..len {
            self.advance();
        }
        let span = self.span_from(start);
        let text = self.text_for(span);
        Ok(Token::new(TokenKind::Note(text.into()), span, self.line))
    }

    /// Lexes a lowercase keyword by longest match against the fixed
    /// keyword table.
    fn lex_keyword(&mut self) -> Result<Token, LexError> {
        let remaining = self.remaining();
        let Some(keyword) = KEYWORDS.iter().find(|kw| remaining.starts_with(**kw)) else {
            return Err(self.illegal_char());
        };

        let start = self.current_position();
        for _ in 0..keyword.len() {
            self.advance();
        }
        Ok(Token::new(
            keyword_kind(keyword),
            self.span_from(start),
            self.line,
        ))
    }

    /// Lexes an integer literal.
    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_digit());
        let span = self.span_from(start);
        let text = self.text_for(span);
        let Ok(value) = text.parse::<u32>() else {
            // Only reachable on an absurdly long digit run.
            let c = text.chars().next().unwrap_or('0');
            return Err(LexError::new(c, self.line, span));
        };
        Ok(Token::new(TokenKind::Number(value), span, self.line))
    }
}

/// Tokenizes source text in one call.
///
/// # Errors
///
/// Returns a [`LexError`] for the first illegal character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    #[test]
    fn lex_note_and_duration() {
        assert_eq!(
            kinds("C4 qn"),
            vec![
                TokenKind::Note("C4".into()),
                TokenKind::Duration("qn".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_tempo_clause() {
        assert_eq!(
            kinds("tempo=120"),
            vec![
                TokenKind::Tempo,
                TokenKind::Equals,
                TokenKind::Number(120),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_chord() {
        assert_eq!(
            kinds("[C4 E4 G4] wn"),
            vec![
                TokenKind::LBracket,
                TokenKind::Note("C4".into()),
                TokenKind::Note("E4".into()),
                TokenKind::Note("G4".into()),
                TokenKind::RBracket,
                TokenKind::Duration("wn".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_accidentals() {
        assert_eq!(
            kinds("C#4 Bb3"),
            vec![
                TokenKind::Note("C#4".into()),
                TokenKind::Note("Bb3".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_rests_and_durations_are_distinct() {
        assert_eq!(
            kinds("qr qn sr sn"),
            vec![
                TokenKind::Rest("qr".into()),
                TokenKind::Duration("qn".into()),
                TokenKind::Rest("sr".into()),
                TokenKind::Duration("sn".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_scale_keywords() {
        assert_eq!(
            kinds("C4 maj pent"),
            vec![
                TokenKind::Note("C4".into()),
                TokenKind::ScaleType("maj".into()),
                TokenKind::ScaleExtension("pent".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("A4 min chrom"),
            vec![
                TokenKind::Note("A4".into()),
                TokenKind::ScaleType("min".into()),
                TokenKind::ScaleExtension("chrom".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn newline_run_collapses_to_one_token() {
        let tokens = tokenize("C4 qn\n\n\nD4 hn").unwrap();
        let newlines: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t.kind(), TokenKind::Newline))
            .collect();
        assert_eq!(newlines.len(), 1);
        // The run consumed three newlines, so the following note is on line 4.
        assert_eq!(tokens.last().unwrap().line(), 4);
    }

    #[test]
    fn comments_are_discarded() {
        assert_eq!(
            kinds("# a whole comment line\nC4 qn # trailing comment"),
            vec![
                TokenKind::Newline,
                TokenKind::Note("C4".into()),
                TokenKind::Duration("qn".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn illegal_character_reports_char_and_line() {
        let err = tokenize("tempo=120\nC4 qn\n$").unwrap_err();
        assert_eq!(err.character, '$');
        assert_eq!(err.line, 3);
    }

    #[test]
    fn unknown_lowercase_word_is_illegal() {
        let err = tokenize("xyz").unwrap_err();
        assert_eq!(err.character, 'x');
        assert_eq!(err.line, 1);
    }

    #[test]
    fn note_letter_without_octave_is_illegal() {
        // Scale roots carry their octave; a bare letter matches nothing.
        let err = tokenize("C maj").unwrap_err();
        assert_eq!(err.character, 'C');
    }

    #[test]
    fn note_letter_outside_a_to_g_is_illegal() {
        let err = tokenize("H4 qn").unwrap_err();
        assert_eq!(err.character, 'H');
    }

    #[test]
    fn tokens_carry_lines() {
        let tokens = tokenize("tempo=120\nC4 qn\nD4 hn\n").unwrap();
        let note_lines: Vec<u32> = tokens
            .iter()
            .filter(|t| matches!(t.kind(), TokenKind::Note(_)))
            .map(Token::line)
            .collect();
        assert_eq!(note_lines, vec![2, 3]);
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn crlf_lexes_like_lf() {
        assert_eq!(kinds("C4 qn\r\nD4 hn"), kinds("C4 qn\nD4 hn"));
    }

    #[test]
    fn spans_index_back_into_source() {
        let source = "tempo=120\nC#4 qn";
        let tokens = tokenize(source).unwrap();
        let note = tokens
            .iter()
            .find(|t| matches!(t.kind(), TokenKind::Note(_)))
            .unwrap();
        assert_eq!(&source[note.span().as_range()], "C#4");
    }
}
