// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Translation of a composition into a timed event stream.
//!
//! Events carry delta-times: the number of ticks since the previous
//! event in the stream. Rests produce no events of their own — their
//! duration is accumulated and carried into the delta of the next
//! event, or into the end-of-track event when nothing follows.
//!
//! Pitch spellings resolve against a fixed table (middle C, `C4`, is
//! note number 60) and scales resolve against fixed interval tables,
//! both only here — the parser hands them through textually.

use ecow::EcoString;

use crate::ast::{Composition, MusicElement, ScaleSpec};

use super::CodegenError;

/// Ticks per quarter note, as a tick count.
const QUARTER_NOTE_TICKS: u32 = super::TICKS_PER_QUARTER_NOTE as u32;

/// Interval patterns in semitone offsets from the root, ascending,
/// ending one octave up.
const MAJOR: &[i32] = &[0, 2, 4, 5, 7, 9, 11, 12];
const MINOR: &[i32] = &[0, 2, 3, 5, 7, 8, 10, 12];
const MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9, 12];
const MINOR_PENTATONIC: &[i32] = &[0, 3, 5, 7, 10, 12];
const CHROMATIC: &[i32] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// The kind of a timed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Tempo meta-event. Emitted exactly once, first.
    TempoMeta {
        /// Microseconds per quarter-note beat.
        microseconds_per_beat: u32,
    },

    /// A key starts sounding.
    NoteOn {
        /// MIDI note number.
        key: u8,
    },

    /// A key stops sounding.
    NoteOff {
        /// MIDI note number.
        key: u8,
    },

    /// End of the stream. Its delta carries any trailing silence so
    /// that compositions ending in rests keep their full length.
    EndOfTrack,
}

/// A timed event: kind plus ticks since the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What happens.
    pub kind: EventKind,
    /// Ticks since the previous event.
    pub delta: u32,
}

impl Event {
    /// Creates a new event.
    #[must_use]
    pub const fn new(kind: EventKind, delta: u32) -> Self {
        Self { kind, delta }
    }
}

/// Resolves a pitch spelling to its semitone number (middle C = 60).
///
/// The spelling is a letter A–G, an optional `#` or `b` accidental,
/// and an octave digit 0–9. The result may fall outside the MIDI
/// range for extreme octaves; range checking happens when the number
/// becomes an event key.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidPitch`] for anything else.
pub fn resolve_pitch(spelling: &str) -> Result<i32, CodegenError> {
    let invalid = || CodegenError::InvalidPitch {
        spelling: spelling.into(),
    };

    let mut chars = spelling.chars();
    let base = match chars.next().ok_or_else(invalid)? {
        'C' => 60,
        'D' => 62,
        'E' => 64,
        'F' => 65,
        'G' => 67,
        'A' => 69,
        'B' => 71,
        _ => return Err(invalid()),
    };

    let mut next = chars.next().ok_or_else(invalid)?;
    let accidental = match next {
        '#' => {
            next = chars.next().ok_or_else(invalid)?;
            1
        }
        'b' => {
            next = chars.next().ok_or_else(invalid)?;
            -1
        }
        _ => 0,
    };

    let octave = i32::try_from(next.to_digit(10).ok_or_else(invalid)?).map_err(|_| invalid())?;
    if chars.next().is_some() {
        return Err(invalid());
    }

    Ok(base + (octave - 4) * 12 + accidental)
}

/// Resolves the ascending pitch sequence of a scale, root through the
/// octave, from the fixed interval tables.
///
/// Chromatic runs ignore the major/minor distinction: `maj chrom` and
/// `min chrom` both produce all twelve semitones.
///
/// # Errors
///
/// Returns [`CodegenError::UnknownScale`] for a type/extension pair
/// with no table, or a pitch error from the root spelling.
pub fn scale_pitches(spec: &ScaleSpec) -> Result<Vec<i32>, CodegenError> {
    let root = resolve_pitch(&spec.root)?;
    let intervals = match (spec.kind.as_str(), spec.extension.as_deref()) {
        ("maj", None) => MAJOR,
        ("min", None) => MINOR,
        ("maj", Some("pent")) => MAJOR_PENTATONIC,
        ("min", Some("pent")) => MINOR_PENTATONIC,
        ("maj" | "min", Some("chrom")) => CHROMATIC,
        _ => {
            return Err(CodegenError::UnknownScale {
                name: scale_name(spec),
            });
        }
    };
    Ok(intervals.iter().map(|interval| root + interval).collect())
}

/// Combined scale key for error messages, e.g. `maj pent`.
fn scale_name(spec: &ScaleSpec) -> EcoString {
    match &spec.extension {
        Some(ext) => format!("{} {ext}", spec.kind).into(),
        None => spec.kind.clone(),
    }
}

/// Tick count for a duration code.
fn duration_ticks(code: &str) -> Result<u32, CodegenError> {
    match code {
        "wn" => Ok(QUARTER_NOTE_TICKS * 4),
        "hn" => Ok(QUARTER_NOTE_TICKS * 2),
        "qn" => Ok(QUARTER_NOTE_TICKS),
        "en" => Ok(QUARTER_NOTE_TICKS / 2),
        "sn" => Ok(QUARTER_NOTE_TICKS / 4),
        _ => Err(CodegenError::UnknownDuration { code: code.into() }),
    }
}

/// Tick count for a rest code. Same durations as notes, silent.
fn rest_ticks(code: &str) -> Result<u32, CodegenError> {
    match code {
        "wr" => Ok(QUARTER_NOTE_TICKS * 4),
        "hr" => Ok(QUARTER_NOTE_TICKS * 2),
        "qr" => Ok(QUARTER_NOTE_TICKS),
        "er" => Ok(QUARTER_NOTE_TICKS / 2),
        "sr" => Ok(QUARTER_NOTE_TICKS / 4),
        _ => Err(CodegenError::UnknownDuration { code: code.into() }),
    }
}

/// Checks a resolved semitone number against the MIDI key range.
fn midi_key(semitone: i32) -> Result<u8, CodegenError> {
    u8::try_from(semitone)
        .ok()
        .filter(|key| *key <= 127)
        .ok_or(CodegenError::NoteOutOfRange { key: semitone })
}

/// Walks a composition and emits its event stream.
struct Generator {
    events: Vec<Event>,
    /// Silence accumulated from rests, carried into the next event's
    /// delta.
    pending: u32,
}

impl Generator {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            pending: 0,
        }
    }

    /// Pushes an event, folding any pending silence into its delta.
    fn emit(&mut self, kind: EventKind, delta: u32) {
        self.events.push(Event::new(kind, delta + self.pending));
        self.pending = 0;
    }

    /// Emits on/off events for one sounding note.
    fn emit_note(&mut self, key: u8, ticks: u32) {
        self.emit(EventKind::NoteOn { key }, 0);
        self.emit(EventKind::NoteOff { key }, ticks);
    }

    /// Emits simultaneous on events, then off events in the same
    /// pitch order after the shared duration.
    fn emit_chord(&mut self, keys: &[u8], ticks: u32) {
        for &key in keys {
            self.emit(EventKind::NoteOn { key }, 0);
        }
        for (index, &key) in keys.iter().enumerate() {
            let delta = if index == 0 { ticks } else { 0 };
            self.emit(EventKind::NoteOff { key }, delta);
        }
    }

    fn element(&mut self, element: &MusicElement) -> Result<(), CodegenError> {
        match element {
            MusicElement::Note { pitch, duration } => {
                let key = midi_key(resolve_pitch(pitch)?)?;
                let ticks = duration_ticks(duration)?;
                self.emit_note(key, ticks);
            }
            MusicElement::Rest { duration } => {
                self.pending += rest_ticks(duration)?;
            }
            MusicElement::Chord { pitches, duration } => {
                if pitches.is_empty() {
                    return Err(CodegenError::EmptyChord);
                }
                let keys = pitches
                    .iter()
                    .map(|pitch| midi_key(resolve_pitch(pitch)?))
                    .collect::<Result<Vec<u8>, CodegenError>>()?;
                let ticks = duration_ticks(duration)?;
                self.emit_chord(&keys, ticks);
            }
            MusicElement::Scale(spec) => {
                let ascending = scale_pitches(spec)?;
                // Up, then down without repeating the turnaround pitch.
                let descending = ascending[..ascending.len() - 1].iter().rev();
                for &semitone in ascending.iter().chain(descending) {
                    let key = midi_key(semitone)?;
                    self.emit_note(key, QUARTER_NOTE_TICKS);
                }
            }
        }
        Ok(())
    }
}

/// Generates the ordered event stream for a composition.
///
/// The stream starts with the tempo meta-event at delta 0 and ends
/// with an end-of-track event whose delta carries trailing silence.
/// Generation is a pure function of the composition.
///
/// # Errors
///
/// Returns a [`CodegenError`] for unresolvable pitches, unknown
/// duration codes, unknown scale keys, empty chords, or a zero tempo.
pub fn generate(composition: &Composition) -> Result<Vec<Event>, CodegenError> {
    if composition.tempo == 0 {
        return Err(CodegenError::ZeroTempo);
    }
    let microseconds_per_beat = 60_000_000 / composition.tempo;

    let mut generator = Generator::new();
    generator.emit(EventKind::TempoMeta { microseconds_per_beat }, 0);
    for element in &composition.elements {
        generator.element(element)?;
    }
    generator.emit(EventKind::EndOfTrack, 0);
    Ok(generator.events)
}
