use std::collections::HashMap;

/// Pitch used for string labels missing from the tuning table (middle C)
pub const DEFAULT_PITCH: i32 = 60;

pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A named tuning, listed from the lowest string to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningPreset {
    pub name: &'static str,
    pub strings: &'static [(&'static str, i32)],
}

pub const STANDARD_TUNING: TuningPreset = TuningPreset {
    name: "standard",
    strings: &[("E", 40), ("A", 45), ("D", 50), ("G", 55), ("B", 59), ("e", 64)],
};

/// Both D strings share the same label, the high one wins.
pub const DROP_D_TUNING: TuningPreset = TuningPreset {
    name: "drop-d",
    strings: &[("D", 38), ("A", 45), ("D", 50), ("G", 55), ("B", 59), ("e", 64)],
};

/// Both B strings share the same label, the high one wins.
pub const SEVEN_STRING_TUNING: TuningPreset = TuningPreset {
    name: "seven-string",
    strings: &[
        ("B", 35),
        ("E", 40),
        ("A", 45),
        ("D", 50),
        ("G", 55),
        ("B", 59),
        ("e", 64),
    ],
};

pub const BASS_TUNING: TuningPreset = TuningPreset {
    name: "bass",
    strings: &[("E", 28), ("A", 33), ("D", 38), ("G", 43)],
};

pub const TUNING_PRESETS: [TuningPreset; 4] = [
    STANDARD_TUNING,
    DROP_D_TUNING,
    SEVEN_STRING_TUNING,
    BASS_TUNING,
];

/// Find a built-in preset by name (case insensitive)
pub fn find_preset(name: &str) -> Option<TuningPreset> {
    TUNING_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
        .copied()
}

/// Mapping from string label to the pitch of the open string.
///
/// Labels are opaque keys, `"e"` and `"E"` are different strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuningTable {
    base_pitches: HashMap<String, i32>,
}

impl TuningTable {
    /// Build a table from ordered entries, the last entry wins on duplicate labels.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut base_pitches = HashMap::new();
        for (label, pitch) in entries {
            if let Some(previous) = base_pitches.insert(label.to_string(), pitch) {
                log::warn!(
                    "Duplicate string label '{label}' in tuning: {previous} replaced by {pitch}"
                );
            }
        }
        Self { base_pitches }
    }

    pub fn from_preset(preset: &TuningPreset) -> Self {
        Self::from_entries(preset.strings.iter().copied())
    }

    /// Open string pitch for `label`, if known
    pub fn base_pitch(&self, label: &str) -> Option<i32> {
        self.base_pitches.get(label).copied()
    }

    /// Pitch of `fret` on string `label`.
    ///
    /// Unknown labels sound `DEFAULT_PITCH` whatever the fret.
    pub fn resolve(&self, label: &str, fret: u32) -> i32 {
        match self.base_pitch(label) {
            Some(base) => base.saturating_add_unsigned(fret),
            None => DEFAULT_PITCH,
        }
    }

    pub fn len(&self) -> usize {
        self.base_pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_pitches.is_empty()
    }
}

impl Default for TuningTable {
    fn default() -> Self {
        Self::from_preset(&STANDARD_TUNING)
    }
}

/// Note name with octave, MIDI pitch 60 is `C4`
pub fn pitch_name(pitch: i32) -> String {
    let note = SHARP_NOTES[pitch.rem_euclid(12) as usize];
    let octave = pitch.div_euclid(12) - 1;
    format!("{note}{octave}")
}
