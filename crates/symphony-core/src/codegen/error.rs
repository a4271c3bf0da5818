// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Error type for code generation and file output.

use camino::Utf8PathBuf;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// An error encountered while translating a composition into events
/// or while writing the output file.
///
/// Code generation works on resolved values, not source positions, so
/// these errors carry no span or line.
#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    /// A pitch spelling that is not letter A–G, optional `#`/`b`,
    /// octave digit.
    #[error("invalid pitch spelling '{spelling}'")]
    #[diagnostic(code(symphony::codegen::pitch))]
    InvalidPitch {
        /// The offending spelling.
        spelling: EcoString,
    },

    /// A resolved note number outside the MIDI range.
    #[error("note number {key} is outside the MIDI range 0..=127")]
    #[diagnostic(code(symphony::codegen::range))]
    NoteOutOfRange {
        /// The resolved semitone number.
        key: i32,
    },

    /// A duration or rest code with no tick-count mapping.
    #[error("unknown duration code '{code}'")]
    #[diagnostic(code(symphony::codegen::duration))]
    UnknownDuration {
        /// The offending code.
        code: EcoString,
    },

    /// A scale type/extension pair with no interval table.
    #[error("unsupported scale '{name}'")]
    #[diagnostic(code(symphony::codegen::scale))]
    UnknownScale {
        /// The combined scale key, e.g. `maj pent`.
        name: EcoString,
    },

    /// A chord with no pitches.
    #[error("chord has no pitches")]
    #[diagnostic(code(symphony::codegen::chord))]
    EmptyChord,

    /// A tempo of zero beats per minute.
    #[error("tempo must be positive")]
    #[diagnostic(code(symphony::codegen::tempo))]
    ZeroTempo,

    /// The output file could not be written.
    #[error("unable to save MIDI file '{path}'")]
    #[diagnostic(code(symphony::codegen::io))]
    Io {
        /// The target path.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
