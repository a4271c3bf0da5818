// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics using miette.
//!
//! Wraps a core [`CompileError`] together with the source text so
//! miette can render the offending line with an arrow under the exact
//! location. Code generation errors carry no source span and render
//! as a plain message.

use miette::{Diagnostic, SourceSpan};
use symphony_core::CompileError;

/// A compilation failure with enough context to render to a user.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{error}")]
#[diagnostic()]
pub struct CompileDiagnostic {
    /// The underlying stage error.
    error: CompileError,
    /// Source code for context.
    #[source_code]
    src: miette::NamedSource<String>,
    /// Location of the error, when the failing stage tracked one.
    #[label("here")]
    span: Option<SourceSpan>,
}

impl CompileDiagnostic {
    /// Wraps a core error with its source file for rendering.
    pub fn new(error: CompileError, source_path: &str, source: &str) -> Self {
        let span = error.span().map(Into::into);
        Self {
            error,
            src: miette::NamedSource::new(source_path, source.to_string()),
            span,
        }
    }
}
