//! Ruxtab - ASCII guitar tablature to MIDI converter
//!
//! This library provides:
//! - Parsing of plain text tablature into timed notes
//! - Encoding of notes into a single track MIDI file
//! - Decoding of the produced MIDI files for inspection
//!
//! # Example
//!
//! ```no_run
//! use ruxtab::{encode_midi, TabParser, DEFAULT_TICKS_PER_BEAT};
//!
//! let notes = TabParser::default().parse("e|---3---|\nB|-------|");
//! let midi_data = encode_midi(&notes, DEFAULT_TICKS_PER_BEAT);
//! std::fs::write("song.mid", midi_data).unwrap();
//! ```

pub mod error;
pub mod midi;
pub mod parser;

// Re-export main types for convenience
pub use error::RuxError;
pub use midi::{
    midi_builder::MidiBuilder,
    midi_event::{MidiEvent, MidiEventType},
    midi_file::{encode_midi, write_midi_file, MidiFile},
    midi_parser::parse_midi_data,
};
pub use parser::staff::Staff;
pub use parser::tab_parser::{
    read_tab_file, Note, NoteDump, ParserContext, TabParser, DEFAULT_TEMPO,
    DEFAULT_TICKS_PER_BEAT, DEFAULT_VELOCITY,
};
pub use parser::tuning::{
    find_preset, pitch_name, TuningPreset, TuningTable, DEFAULT_PITCH, STANDARD_TUNING,
    TUNING_PRESETS,
};
