pub const NOTE_ON_STATUS: u8 = 0x90;
pub const NOTE_OFF_STATUS: u8 = 0x80;
pub const META_STATUS: u8 = 0xFF;
pub const END_OF_TRACK_META: u8 = 0x2F;

/// Velocity sent with every note off
pub const RELEASE_VELOCITY: u8 = 0x40;

/// Data bytes only carry 7 bits
pub const DATA_MASK: u8 = 0x7F;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MidiEvent {
    /// Ticks since the previous event, a single byte wrapped to 7 bits.
    pub delta: u8,
    /// The type of the event.
    pub event: MidiEventType,
}

impl MidiEvent {
    pub const fn new_note_on(delta: u8, key: u8, velocity: u8) -> Self {
        Self {
            delta: delta & DATA_MASK,
            event: MidiEventType::NoteOn(key & DATA_MASK, velocity & DATA_MASK),
        }
    }

    pub const fn new_note_off(delta: u8, key: u8) -> Self {
        Self {
            delta: delta & DATA_MASK,
            event: MidiEventType::NoteOff(key & DATA_MASK, RELEASE_VELOCITY),
        }
    }

    pub const fn new_end_of_track() -> Self {
        Self {
            delta: 0,
            event: MidiEventType::EndOfTrack,
        }
    }

    pub const fn is_note_on(&self) -> bool {
        matches!(self.event, MidiEventType::NoteOn(_, _))
    }

    pub const fn is_note_off(&self) -> bool {
        matches!(self.event, MidiEventType::NoteOff(_, _))
    }

    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.event, MidiEventType::EndOfTrack)
    }

    /// Append the wire representation: delta byte then the event bytes
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.delta);
        match self.event {
            MidiEventType::NoteOn(key, velocity) => {
                out.extend_from_slice(&[NOTE_ON_STATUS, key, velocity]);
            }
            MidiEventType::NoteOff(key, velocity) => {
                out.extend_from_slice(&[NOTE_OFF_STATUS, key, velocity]);
            }
            MidiEventType::EndOfTrack => {
                out.extend_from_slice(&[META_STATUS, END_OF_TRACK_META, 0x00]);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MidiEventType {
    NoteOn(u8, u8),  // key, velocity
    NoteOff(u8, u8), // key, release velocity
    EndOfTrack,
}
