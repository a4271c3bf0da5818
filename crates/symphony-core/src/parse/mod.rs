// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Symphony source code.
//!
//! This module contains the lexer, the parser, and their error types.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each
//! token carries its byte-offset [`Span`] and its 1-based source line.
//!
//! ```
//! use symphony_core::parse::Lexer;
//!
//! let tokens = Lexer::new("C4 qn").tokenize().unwrap();
//! assert_eq!(tokens.len(), 3); // NOTE, DURATION, EOF
//! ```
//!
//! # Parsing
//!
//! The [`Parser`] consumes the token stream and builds an
//! [`ast::Composition`](crate::ast::Composition) according to the
//! grammar:
//!
//! ```text
//! composition := "tempo" "=" NUMBER element*
//! element     := note | scale | chord | rest
//! note        := NOTE DURATION
//! scale       := NOTE SCALE_TYPE [SCALE_EXTENSION]
//! chord       := "[" NOTE+ "]" DURATION
//! rest        := REST
//! ```
//!
//! Both stages fail fast: the first illegal character or syntax error
//! aborts the compilation with a located error.

mod error;
mod lexer;
mod parser;
mod span;
mod token;

pub use error::{LexError, ParseError};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
