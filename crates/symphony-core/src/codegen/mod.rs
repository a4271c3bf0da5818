// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Code generation for Symphony.
//!
//! This stage walks a parsed [`Composition`](crate::ast::Composition)
//! and translates it into a strictly ordered stream of timed events
//! ([`events`]), then packs the stream into Standard MIDI File bytes
//! ([`smf`]). Pitch spellings, duration codes, and scale keywords are
//! resolved here, via fixed tables; resolution failures surface as
//! [`CodegenError`].

mod error;
pub mod events;
pub mod smf;

pub use error::CodegenError;
pub use events::{Event, EventKind, generate};

/// Output resolution: ticks per quarter note, declared in the file
/// header and assumed by every duration table.
pub const TICKS_PER_QUARTER_NOTE: u16 = 480;
