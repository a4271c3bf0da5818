// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Standard MIDI File serialization.
//!
//! Packs an event stream into a Type-0 file: one `MThd` header chunk
//! declaring format 0, a single track, and the 480 ticks-per-quarter
//! resolution, followed by one `MTrk` chunk of variable-length
//! delta-time-prefixed events. Downstream players parse this file
//! independently, so the bytes follow the standard exactly.
//!
//! Saving publishes atomically: bytes are written to a sibling
//! temporary file which is renamed over the destination, so a failed
//! write never leaves a corrupt file at the target path.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use super::{CodegenError, Event, EventKind, TICKS_PER_QUARTER_NOTE};

/// Constant velocity for note-on and note-off events.
const VELOCITY: u8 = 64;

/// MIDI channel for all note events.
const CHANNEL: u8 = 0;

/// Serializes an event stream into a complete MIDI file byte image.
#[must_use]
pub fn to_bytes(events: &[Event]) -> Vec<u8> {
    let track = track_chunk(events);

    let mut out = Vec::with_capacity(14 + 8 + track.len());
    // MThd, length 6, format 0, one track, resolution.
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&TICKS_PER_QUARTER_NOTE.to_be_bytes());

    out.extend_from_slice(b"MTrk");
    out.extend_from_slice(&u32_len(&track).to_be_bytes());
    out.extend_from_slice(&track);
    out
}

/// Builds the body of the single track chunk.
fn track_chunk(events: &[Event]) -> Vec<u8> {
    let mut track = Vec::new();
    for event in events {
        write_vlq(&mut track, event.delta);
        match event.kind {
            EventKind::TempoMeta {
                microseconds_per_beat,
            } => {
                track.extend_from_slice(&[0xFF, 0x51, 0x03]);
                let [_, a, b, c] = microseconds_per_beat.to_be_bytes();
                track.extend_from_slice(&[a, b, c]);
            }
            EventKind::NoteOn { key } => {
                track.extend_from_slice(&[0x90 | CHANNEL, key, VELOCITY]);
            }
            EventKind::NoteOff { key } => {
                track.extend_from_slice(&[0x80 | CHANNEL, key, VELOCITY]);
            }
            EventKind::EndOfTrack => {
                track.extend_from_slice(&[0xFF, 0x2F, 0x00]);
            }
        }
    }

    // A stream that never reached its end-of-track event still needs
    // the mandatory marker.
    if !matches!(
        events.last(),
        Some(Event {
            kind: EventKind::EndOfTrack,
            ..
        })
    ) {
        track.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    }
    track
}

/// Chunk length as a big-endian u32, saturating on absurd sizes.
fn u32_len(chunk: &[u8]) -> u32 {
    u32::try_from(chunk.len()).unwrap_or(u32::MAX)
}

/// Writes a MIDI variable-length quantity: 7 bits per byte, high bit
/// set on every byte except the last.
fn write_vlq(buf: &mut Vec<u8>, mut value: u32) {
    let mut bytes = [0u8; 5];
    let mut index = 4;
    bytes[index] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        index -= 1;
        bytes[index] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }
    buf.extend_from_slice(&bytes[index..]);
}

/// Writes a serialized file to `path`, atomically.
///
/// The bytes land in a sibling `.tmp` file first and are renamed into
/// place, flushed, in one step.
///
/// # Errors
///
/// Returns [`CodegenError::Io`] naming the target path if the write
/// or rename fails; the temporary file is removed on failure.
pub fn save(path: &Utf8Path, bytes: &[u8]) -> Result<(), CodegenError> {
    let io_error = |source: std::io::Error| CodegenError::Io {
        path: path.to_owned(),
        source,
    };

    let tmp = Utf8PathBuf::from(format!("{path}.tmp"));
    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map_err(io_error)
}
