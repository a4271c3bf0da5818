// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Abstract representation of a parsed composition.
//!
//! The parser produces these types and the code generator consumes
//! them; nothing else touches them. Pitch spellings (`C#4`), duration
//! codes (`qn`), and scale keywords stay textual here — they are
//! resolved to semitone numbers, tick counts, and interval tables only
//! at code-generation time.

use ecow::EcoString;

/// A single musical element in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicElement {
    /// One pitch sounded for one duration: `C4 qn`.
    Note {
        /// Pitch spelling, e.g. `C4`, `C#4`, `Bb3`.
        pitch: EcoString,
        /// Duration code, e.g. `qn`.
        duration: EcoString,
    },

    /// Silence for one duration: `qr`.
    Rest {
        /// Rest code, e.g. `qr`.
        duration: EcoString,
    },

    /// Several pitches sounded simultaneously for one shared
    /// duration: `[C4 E4 G4] wn`.
    Chord {
        /// Pitch spellings in source order. The parser guarantees at
        /// least one.
        pitches: Vec<EcoString>,
        /// Duration code applying to every pitch.
        duration: EcoString,
    },

    /// An up-then-down run derived from a root pitch and an interval
    /// pattern: `C4 maj`, `A4 min pent`. Scales always play as
    /// quarter notes.
    Scale(ScaleSpec),
}

/// A scale: root pitch, type, and optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSpec {
    /// Root pitch spelling, e.g. `C4`.
    pub root: EcoString,
    /// Scale type keyword: `maj` or `min`.
    pub kind: EcoString,
    /// Optional extension keyword: `pent` or `chrom`.
    pub extension: Option<EcoString>,
}

impl ScaleSpec {
    /// Creates a new scale spec.
    #[must_use]
    pub fn new(
        root: impl Into<EcoString>,
        kind: impl Into<EcoString>,
        extension: Option<EcoString>,
    ) -> Self {
        Self {
            root: root.into(),
            kind: kind.into(),
            extension,
        }
    }
}

/// A complete parsed composition.
///
/// The tempo is set exactly once, before any element. Elements
/// preserve source order, which is the playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Tempo in beats per minute.
    pub tempo: u32,
    /// Musical elements in source order.
    pub elements: Vec<MusicElement>,
}

impl Composition {
    /// Creates a new composition.
    #[must_use]
    pub fn new(tempo: u32, elements: Vec<MusicElement>) -> Self {
        Self { tempo, elements }
    }
}
