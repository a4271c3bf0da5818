// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Symphony compiler core.
//!
//! Symphony is a small textual music notation language: note/duration
//! lines, a tempo directive, scales, chords, and rests. This crate
//! compiles Symphony source text into a Standard MIDI File (Type 0,
//! single track).
//!
//! The pipeline is strictly staged:
//!
//! 1. Lexical analysis ([`parse::Lexer`]): text → tokens
//! 2. Parsing ([`parse::Parser`]): tokens → [`ast::Composition`]
//! 3. Code generation ([`codegen`]): composition → timed events → bytes
//!
//! No stage calls back into an earlier one, and no stage holds state
//! between compilations: every [`compile`] call is independent and
//! reentrant.
//!
//! # Example
//!
//! ```
//! let bytes = symphony_core::compile("tempo=120\nC4 qn\nD4 hn\n").unwrap();
//! assert_eq!(&bytes[0..4], b"MThd");
//! ```

pub mod ast;
pub mod codegen;
pub mod parse;

use miette::Diagnostic;
use thiserror::Error;

use crate::codegen::CodegenError;
use crate::parse::{LexError, Lexer, ParseError, Parser};

/// An error from any stage of the compilation pipeline.
///
/// Each variant preserves the underlying stage error so callers can
/// distinguish the three kinds programmatically, not just by message
/// text. Line information is carried by the lexer and parser variants.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    /// The lexer rejected an illegal character.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// The parser rejected the token stream.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The code generator could not translate the composition.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Returns the 1-based source line of the error, when the failing
    /// stage tracks one. Code generation errors have no line: they
    /// concern values, not source positions.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Lex(e) => Some(e.line),
            Self::Parse(e) => Some(e.line),
            Self::Codegen(_) => None,
        }
    }

    /// Returns the source span of the error, when available.
    #[must_use]
    pub fn span(&self) -> Option<parse::Span> {
        match self {
            Self::Lex(e) => Some(e.span),
            Self::Parse(e) => Some(e.span),
            Self::Codegen(_) => None,
        }
    }
}

/// Compiles Symphony source text into Standard MIDI File bytes.
///
/// This is the single externally relevant operation: the GUI and CLI
/// front ends hand raw composition text in and get a complete `.mid`
/// byte image (or exactly one error) back. The output is a pure
/// function of the input — compiling the same source twice yields
/// byte-identical results.
///
/// # Errors
///
/// Returns the first error encountered by any stage; no partial
/// recovery or error collection is attempted.
pub fn compile(source: &str) -> Result<Vec<u8>, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    let composition = Parser::new(tokens).parse()?;
    let events = codegen::generate(&composition)?;
    Ok(codegen::smf::to_bytes(&events))
}

/// Compiles Symphony source text and saves the result to `path`.
///
/// The file is published atomically: an I/O failure or a compile
/// error never leaves a corrupt file at the destination.
///
/// # Errors
///
/// Returns the first compilation error, or a
/// [`CodegenError::Io`](codegen::CodegenError::Io) naming `path` if
/// the write fails.
pub fn compile_to_file(source: &str, path: &camino::Utf8Path) -> Result<(), CompileError> {
    let bytes = compile(source)?;
    codegen::smf::save(path, &bytes)?;
    Ok(())
}
