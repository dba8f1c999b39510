//! Reader for the files produced by `encode_midi`
//!
//! Deltas are read as single bytes, like they are written.

use crate::midi::midi_event::{
    MidiEvent, MidiEventType, END_OF_TRACK_META, META_STATUS, NOTE_OFF_STATUS, NOTE_ON_STATUS,
};
use crate::midi::midi_file::{MidiFile, HEADER_LENGTH, HEADER_MAGIC, TRACK_MAGIC};
use crate::parser::primitive_parser::{parse_chunk_magic, parse_u16, parse_u32, parse_u8};
use crate::RuxError;
use nom::bytes::complete::take;
use nom::error::{Error, ErrorKind};
use nom::{IResult, Parser};

struct Header {
    format: u16,
    track_count: u16,
    ticks_per_beat: u16,
}

fn failure(i: &[u8], kind: ErrorKind) -> nom::Err<Error<&[u8]>> {
    nom::Err::Failure(Error::new(i, kind))
}

fn parse_header(i: &[u8]) -> IResult<&[u8], Header> {
    let (i, (_magic, length)) = (parse_chunk_magic(HEADER_MAGIC), parse_u32).parse(i)?;
    if length < HEADER_LENGTH {
        return Err(failure(i, ErrorKind::LengthValue));
    }
    let (i, (format, track_count, ticks_per_beat)) = (parse_u16, parse_u16, parse_u16).parse(i)?;
    // tolerate longer headers
    let (i, _extra) = take(length - HEADER_LENGTH)(i)?;
    let header = Header {
        format,
        track_count,
        ticks_per_beat,
    };
    Ok((i, header))
}

fn parse_event(i: &[u8]) -> IResult<&[u8], MidiEvent> {
    let (i, (delta, status)) = (parse_u8, parse_u8).parse(i)?;
    let (i, event) = match status {
        NOTE_ON_STATUS => {
            let (i, (key, velocity)) = (parse_u8, parse_u8).parse(i)?;
            (i, MidiEventType::NoteOn(key, velocity))
        }
        NOTE_OFF_STATUS => {
            let (i, (key, velocity)) = (parse_u8, parse_u8).parse(i)?;
            (i, MidiEventType::NoteOff(key, velocity))
        }
        META_STATUS => {
            let (i, (meta_type, length)) = (parse_u8, parse_u8).parse(i)?;
            if meta_type != END_OF_TRACK_META || length != 0 {
                return Err(failure(i, ErrorKind::Tag));
            }
            (i, MidiEventType::EndOfTrack)
        }
        _ => return Err(failure(i, ErrorKind::Tag)),
    };
    Ok((i, MidiEvent { delta, event }))
}

fn parse_track(i: &[u8]) -> IResult<&[u8], Vec<MidiEvent>> {
    let (i, (_magic, length)) = (parse_chunk_magic(TRACK_MAGIC), parse_u32).parse(i)?;
    let (rest, mut track_data) = take(length)(i)?;
    let mut events = Vec::new();
    while !track_data.is_empty() {
        let (inner, event) = parse_event(track_data)?;
        track_data = inner;
        let end_of_track = event.is_end_of_track();
        events.push(event);
        if end_of_track {
            break;
        }
    }
    if !track_data.is_empty() {
        log::debug!("{} bytes after end of track", track_data.len());
    }
    Ok((rest, events))
}

/// Decode a single track MIDI file
pub fn parse_midi_data(data: &[u8]) -> Result<MidiFile, RuxError> {
    let (rest, (header, events)) = (parse_header, parse_track).parse(data).map_err(|e| {
        log::error!("Failed to parse MIDI data: {e:?}");
        RuxError::ParsingError("Failed to parse MIDI data".to_string())
    })?;
    if !rest.is_empty() {
        log::warn!("Ignoring {} bytes after the first track", rest.len());
    }
    if !events.last().is_some_and(MidiEvent::is_end_of_track) {
        return Err(RuxError::ParsingError(
            "Track is missing its end of track marker".to_string(),
        ));
    }
    Ok(MidiFile {
        format: header.format,
        track_count: header.track_count,
        ticks_per_beat: header.ticks_per_beat,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::midi_file::encode_midi;
    use crate::parser::tab_parser::Note;

    #[test]
    fn test_parse_empty_track() {
        let midi = parse_midi_data(&encode_midi(&[], 480)).unwrap();
        assert_eq!(midi.format, 0);
        assert_eq!(midi.track_count, 1);
        assert_eq!(midi.ticks_per_beat, 480);
        assert_eq!(midi.events, vec![MidiEvent::new_end_of_track()]);
    }

    #[test]
    fn test_parse_encoded_notes() {
        let notes = [Note::new(64, 240, 120), Note::new(67, 0, 120)];
        let midi = parse_midi_data(&encode_midi(&notes, 480)).unwrap();
        assert_eq!(midi.note_on_count(), 2);
        assert_eq!(midi.events[0], MidiEvent::new_note_on(0, 67, 80));
        assert_eq!(midi.events[2], MidiEvent::new_note_on(112, 64, 80));
    }

    #[test]
    fn test_parse_invalid_magic() {
        let mut data = encode_midi(&[], 480);
        data[0] = b'X';
        assert!(matches!(
            parse_midi_data(&data),
            Err(RuxError::ParsingError(_))
        ));
    }

    #[test]
    fn test_parse_truncated_track() {
        let data = encode_midi(&[Note::new(60, 0, 120)], 480);
        let result = parse_midi_data(&data[..data.len() - 3]);
        assert!(matches!(result, Err(RuxError::ParsingError(_))));
    }

    #[test]
    fn test_parse_unknown_status() {
        let mut data = encode_midi(&[Note::new(60, 0, 120)], 480);
        data[23] = 0xB0;
        assert!(parse_midi_data(&data).is_err());
    }

    #[test]
    fn test_parse_missing_end_of_track() {
        let data = [
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0, // header
            b'M', b'T', b'r', b'k', 0, 0, 0, 4, // track
            0x00, 0x90, 60, 80, // note on only
        ];
        assert!(parse_midi_data(&data).is_err());
    }
}
