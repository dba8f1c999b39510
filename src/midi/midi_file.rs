//! Single track MIDI file layout
//!
//! ```text
//! "MThd" u32(6) u16(0) u16(1) u16(ticks per beat)
//! "MTrk" u32(track length) <events> 00 FF 2F 00
//! ```
//!
//! All numbers are big endian.

use crate::midi::midi_builder::MidiBuilder;
use crate::midi::midi_event::MidiEvent;
use crate::parser::tab_parser::Note;
use crate::RuxError;
use std::path::Path;

pub const HEADER_MAGIC: &[u8; 4] = b"MThd";
pub const TRACK_MAGIC: &[u8; 4] = b"MTrk";
pub const HEADER_LENGTH: u32 = 6;
pub const SINGLE_TRACK_FORMAT: u16 = 0;
pub const TRACK_COUNT: u16 = 1;

/// A decoded MIDI file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    pub format: u16,
    pub track_count: u16,
    pub ticks_per_beat: u16,
    /// Events of the single track, end of track included
    pub events: Vec<MidiEvent>,
}

impl MidiFile {
    pub fn note_on_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_note_on()).count()
    }
}

/// Encode notes into a complete MIDI file.
///
/// Ticks per beat are written on 16 bits, larger values are truncated.
pub fn encode_midi(notes: &[Note], ticks_per_beat: u32) -> Vec<u8> {
    let events = MidiBuilder::new().build_for_notes(notes);
    let mut track_data = Vec::with_capacity(events.len() * 4);
    for event in &events {
        event.write_to(&mut track_data);
    }

    let mut out = Vec::with_capacity(22 + track_data.len());
    out.extend_from_slice(HEADER_MAGIC);
    out.extend_from_slice(&HEADER_LENGTH.to_be_bytes());
    out.extend_from_slice(&SINGLE_TRACK_FORMAT.to_be_bytes());
    out.extend_from_slice(&TRACK_COUNT.to_be_bytes());
    out.extend_from_slice(&((ticks_per_beat & 0xFFFF) as u16).to_be_bytes());
    out.extend_from_slice(TRACK_MAGIC);
    out.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
    out.extend_from_slice(&track_data);
    out
}

/// Encode notes and write them to `path`
pub fn write_midi_file(notes: &[Note], ticks_per_beat: u32, path: &Path) -> Result<(), RuxError> {
    let data = encode_midi(notes, ticks_per_beat);
    std::fs::write(path, &data).map_err(|err| {
        log::error!("Could not write MIDI file {path:?}: {err}");
        RuxError::from(err)
    })?;
    log::debug!("wrote {} bytes to {path:?}", data.len());
    Ok(())
}
