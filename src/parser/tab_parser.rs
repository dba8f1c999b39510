//! ASCII tablature parser
//!
//! A tab is made of sections separated by blank lines. Each section holds one
//! line per string, the string label sits before the first `|`:
//!
//! ```text
//! [Intro]
//! e|---3---|-----0-|
//! B|-------|---1---|
//! ```
//!
//! Within a section, the n-th position token of every string shares the same
//! time slot, each slot lasting a sixteenth note.

use crate::parser::primitive_parser::make_string;
use crate::parser::tuning::{pitch_name, TuningTable, DEFAULT_PITCH};
use crate::RuxError;
use std::fmt;
use std::path::Path;

pub const DEFAULT_TICKS_PER_BEAT: u32 = 480;
pub const DEFAULT_TEMPO: u32 = 120;
pub const DEFAULT_VELOCITY: u8 = 80;

/// Separates the string label from the tab body, and measures within the body
pub const SEPARATOR: char = '|';

/// Playing techniques: release, hammer-on, pull-off and bend
pub const TECHNIQUE_MARKERS: [char; 4] = ['r', 'h', 'p', 'b'];

const RELEASE_MARKER: char = 'r';

/// One sounding note, in ticks from the start of the tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub pitch: i32,
    pub velocity: u8,
    pub start: u32,
    pub duration: u32,
}

impl Note {
    pub const fn new(pitch: i32, start: u32, duration: u32) -> Self {
        Self {
            pitch,
            velocity: DEFAULT_VELOCITY,
            start,
            duration,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "pitch={} ({}) velocity={} start={} duration={}",
            self.pitch,
            pitch_name(self.pitch),
            self.velocity,
            self.start,
            self.duration
        )
    }
}

/// Human readable listing of parsed notes, one per line
pub struct NoteDump<'a>(pub &'a [Note]);

impl fmt::Display for NoteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, note) in self.0.iter().enumerate() {
            writeln!(f, "#{index} {note}")?;
        }
        Ok(())
    }
}

/// Settings shared by a whole parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserContext {
    pub tuning: TuningTable,
    pub ticks_per_beat: u32,
    /// Beats per minute, not part of the encoded output
    pub tempo: u32,
}

impl ParserContext {
    pub const fn new(tuning: TuningTable, ticks_per_beat: u32, tempo: u32) -> Self {
        Self {
            tuning,
            ticks_per_beat,
            tempo,
        }
    }

    /// Length of a time slot, a sixteenth note, never shorter than one tick
    pub const fn slot_ticks(&self) -> u32 {
        let ticks = self.ticks_per_beat / 4;
        if ticks == 0 {
            1
        } else {
            ticks
        }
    }
}

impl Default for ParserContext {
    fn default() -> Self {
        Self::new(TuningTable::default(), DEFAULT_TICKS_PER_BEAT, DEFAULT_TEMPO)
    }
}

/// A staff line split into its string label and its tab body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLine<'a> {
    pub label: &'a str,
    pub body: &'a str,
}

impl<'a> StringLine<'a> {
    /// Lines without separator are comments or headings
    pub fn parse(line: &'a str) -> Option<Self> {
        let (label, body) = line.split_once(SEPARATOR)?;
        Some(Self {
            label: label.trim(),
            body,
        })
    }
}

pub struct TabParser {
    context: ParserContext,
}

impl TabParser {
    pub const fn new(context: ParserContext) -> Self {
        Self { context }
    }

    pub const fn context(&self) -> &ParserContext {
        &self.context
    }

    /// Parse a whole tab, notes are in section order and not sorted
    pub fn parse(&self, text: &str) -> Vec<Note> {
        let mut notes = Vec::new();
        for (section_id, section) in split_sections(text).iter().enumerate() {
            let section_notes = self.parse_section(section);
            log::debug!(
                "section {section_id}: {} lines -> {} notes",
                section.len(),
                section_notes.len()
            );
            notes.extend(section_notes);
        }
        notes
    }

    /// Parse a tab file, read failures are logged and produce no notes
    pub fn parse_file(&self, path: &Path) -> Vec<Note> {
        match read_tab_file(path) {
            Ok(text) => self.parse(&text),
            Err(err) => {
                log::error!("Could not read tab file {path:?}: {err}");
                Vec::new()
            }
        }
    }

    fn parse_section(&self, lines: &[&str]) -> Vec<Note> {
        let staff: Vec<(StringLine, Vec<&str>)> = lines
            .iter()
            .filter_map(|line| StringLine::parse(line))
            .map(|string_line| {
                if self.context.tuning.base_pitch(string_line.label).is_none() {
                    log::warn!(
                        "Unknown string label '{}', notes default to pitch {DEFAULT_PITCH}",
                        string_line.label
                    );
                }
                let tokens = tokenize(string_line.body);
                (string_line, tokens)
            })
            .collect();

        let max_positions = staff
            .iter()
            .map(|(_, tokens)| tokens.len())
            .max()
            .unwrap_or(0);
        let slot_ticks = self.context.slot_ticks();

        let mut notes = Vec::new();
        for slot in 0..max_positions {
            let start = (slot as u32).saturating_mul(slot_ticks);
            for (string_line, tokens) in &staff {
                let Some(token) = tokens.get(slot) else {
                    continue;
                };
                for fret in extract_frets(token) {
                    let pitch = self.context.tuning.resolve(string_line.label, fret);
                    notes.push(Note::new(pitch, start, slot_ticks));
                }
            }
        }
        notes
    }
}

impl Default for TabParser {
    fn default() -> Self {
        Self::new(ParserContext::default())
    }
}

/// Read and decode a tab file
pub fn read_tab_file(path: &Path) -> Result<String, RuxError> {
    let data = std::fs::read(path)?;
    Ok(make_string(&data))
}

/// Group lines into sections delimited by blank lines
pub fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

const fn is_token_char(c: char) -> bool {
    matches!(c, '-' | '0'..='9' | 'r' | 'h' | 'p' | 'b')
}

/// Split a tab body into position tokens.
///
/// Runs of `-`, digits and technique markers form a token, anything else
/// (bar lines, spaces) ends it.
pub fn tokenize(body: &str) -> Vec<&str> {
    body.split(|c: char| !is_token_char(c))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Fret numbers found in a position token, `"5h7"` gives `[5, 7]`
pub fn extract_frets(token: &str) -> Vec<u32> {
    let mut frets = Vec::new();
    // `None` once the current digit run overflowed
    let mut current: Option<Option<u32>> = None;
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(digit) = c.to_digit(10) {
            current = Some(
                current
                    .unwrap_or(Some(0))
                    .and_then(|value| value.checked_mul(10))
                    .and_then(|value| value.checked_add(digit)),
            );
            continue;
        }
        match current.take() {
            Some(Some(fret)) => frets.push(fret),
            Some(None) => log::debug!("Skipping oversized fret in token '{token}'"),
            None => (),
        }
        if c == RELEASE_MARKER {
            // the released fret starts a fresh number
            if let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                chars.next();
                current = Some(Some(digit));
            }
        } else if !TECHNIQUE_MARKERS.contains(&c) && c != '-' {
            log::debug!("Ignoring unexpected character '{c}' in token '{token}'");
        }
    }
    match current {
        Some(Some(fret)) => frets.push(fret),
        Some(None) => log::debug!("Skipping oversized fret in token '{token}'"),
        None => (),
    }
    frets
}
