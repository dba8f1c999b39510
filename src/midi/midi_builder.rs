use crate::midi::midi_event::MidiEvent;
use crate::parser::tab_parser::Note;

pub struct MidiBuilder {
    events: Vec<MidiEvent>, // events accumulated during build
}

impl MidiBuilder {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Turn notes into a note on/off pair each, closed by an end of track.
    ///
    /// Deltas fit a single byte and wrap past 127 ticks. The time cursor only
    /// moves on note starts, a note off is relative to its own note on.
    pub fn build_for_notes(mut self, notes: &[Note]) -> Vec<MidiEvent> {
        // stable sort keeps input order for simultaneous notes
        let mut sorted: Vec<&Note> = notes.iter().collect();
        sorted.sort_by_key(|note| note.start);

        let mut current_time: u32 = 0;
        for note in sorted {
            let key = (note.pitch & 0x7F) as u8;
            let delta_on = (note.start.wrapping_sub(current_time) & 0x7F) as u8;
            self.events
                .push(MidiEvent::new_note_on(delta_on, key, note.velocity));
            current_time = note.start;
            let delta_off = (note.duration & 0x7F) as u8;
            self.events.push(MidiEvent::new_note_off(delta_off, key));
        }
        self.events.push(MidiEvent::new_end_of_track());
        log::debug!(
            "built {} events for {} notes",
            self.events.len(),
            notes.len()
        );
        self.events
    }
}

impl Default for MidiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::midi_event::MidiEventType;

    #[test]
    fn test_no_notes() {
        let events = MidiBuilder::new().build_for_notes(&[]);
        assert_eq!(events, vec![MidiEvent::new_end_of_track()]);
    }

    #[test]
    fn test_sorted_by_start() {
        let notes = [Note::new(64, 240, 120), Note::new(67, 0, 120)];
        let events = MidiBuilder::new().build_for_notes(&notes);
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], MidiEvent::new_note_on(0, 67, 80));
        assert_eq!(events[1], MidiEvent::new_note_off(120, 67));
        // 240 ticks later wraps to 112
        assert_eq!(events[2], MidiEvent::new_note_on(112, 64, 80));
        assert_eq!(events[3], MidiEvent::new_note_off(120, 64));
        assert!(events[4].is_end_of_track());
    }

    #[test]
    fn test_simultaneous_notes_keep_input_order() {
        let notes = [
            Note::new(60, 120, 120),
            Note::new(64, 0, 120),
            Note::new(55, 120, 120),
        ];
        let events = MidiBuilder::new().build_for_notes(&notes);
        let keys: Vec<u8> = events
            .iter()
            .filter_map(|e| match e.event {
                MidiEventType::NoteOn(key, _) => Some(key),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec![64, 60, 55]);
        // cursor does not include the previous duration
        assert_eq!(events[2].delta, 120);
        assert_eq!(events[4].delta, 0);
    }

    #[test]
    fn test_pitch_and_duration_truncated() {
        let notes = [Note::new(200, 0, 130)];
        let events = MidiBuilder::new().build_for_notes(&notes);
        assert_eq!(events[0].event, MidiEventType::NoteOn(72, 80));
        assert_eq!(events[1].delta, 2);
    }
}
