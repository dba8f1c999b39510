//! Integration tests for ruxtab library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use ruxtab::{
    encode_midi, parse_midi_data, read_tab_file, MidiEventType, Note, ParserContext, RuxError,
    TabParser, TuningTable, DEFAULT_TICKS_PER_BEAT,
};
use std::path::Path;

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // This test verifies that the public API types compile and are usable.
    // If any re-export is missing, this test will fail to compile.

    fn _assert_types() {
        let _: fn(&[u8]) -> Result<ruxtab::MidiFile, RuxError> = parse_midi_data;
        let _: fn(&[Note], u32) -> Vec<u8> = encode_midi;
        let _: u32 = DEFAULT_TICKS_PER_BEAT;
    }
}

/// Test the documented single note conversion end to end.
#[test]
fn test_single_note_to_midi() {
    let notes = TabParser::default().parse("e|---3---|\nB|-------|");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, 67);
    assert_eq!(notes[0].start, 0);
    assert_eq!(notes[0].duration, 120);
    assert_eq!(notes[0].velocity, 80);

    let data = encode_midi(&notes, DEFAULT_TICKS_PER_BEAT);
    let parts: [&[u8]; 6] = [
        b"MThd",
        &[0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0],
        b"MTrk",
        &[0, 0, 0, 12],
        &[0x00, 0x90, 67, 80, 120, 0x80, 67, 0x40],
        &[0x00, 0xFF, 0x2F, 0x00],
    ];
    assert_eq!(data, parts.concat());
}

/// Test converting a tab file and reading the MIDI data back.
#[test]
fn test_tab_file_to_midi() {
    let text = read_tab_file(Path::new("test-files/small.txt")).expect("Failed to read test file");
    let notes = TabParser::default().parse(&text);
    assert!(!notes.is_empty(), "Should parse notes");

    let midi = parse_midi_data(&encode_midi(&notes, DEFAULT_TICKS_PER_BEAT))
        .expect("Failed to parse MIDI data");
    assert_eq!(midi.ticks_per_beat, 480);
    assert_eq!(midi.note_on_count(), notes.len());

    let has_note_off = midi
        .events
        .iter()
        .any(|e| matches!(e.event, MidiEventType::NoteOff { .. }));
    assert!(has_note_off, "Should have NoteOff events");
}

/// Test a caller supplied tuning table.
#[test]
fn test_custom_tuning() {
    let tuning = TuningTable::from_entries([("low", 30), ("high", 70)]);
    let parser = TabParser::new(ParserContext::new(tuning, 960, 100));
    let notes = parser.parse("high|-2-|-0-|\nlow|---|-5-|\nmid|-1-|");
    let summary: Vec<(i32, u32)> = notes.iter().map(|n| (n.pitch, n.start)).collect();
    assert_eq!(summary, vec![(72, 0), (60, 0), (70, 240), (35, 240)]);
    assert!(notes.iter().all(|n| n.duration == 240));
}

/// Test error handling for invalid data.
#[test]
fn test_parse_error() {
    let invalid_data = vec![0u8; 10]; // Not a valid MIDI file
    let result = parse_midi_data(&invalid_data);

    assert!(result.is_err(), "Should return error for invalid data");
    let err = result.unwrap_err();
    assert!(
        matches!(err, RuxError::ParsingError(_)),
        "Should be a ParsingError"
    );
}
