use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use ruxtab::{
    parse_midi_data, read_tab_file, write_midi_file, MidiEventType, NoteDump, ParserContext,
    RuxError as LibRuxError, Staff, TabParser, DEFAULT_TEMPO, DEFAULT_TICKS_PER_BEAT,
    STANDARD_TUNING, TUNING_PRESETS,
};
use std::io;
use std::path::{Path, PathBuf};

mod config;

const MIN_TICKS_PER_BEAT: u32 = 4;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ruxtab=info"))
        .init();

    // args
    let args = CliArgs::parse();

    // read local config
    let local_config = Config::read_config()?;

    if args.list_tunings {
        list_tunings(&local_config);
        return Ok(());
    }

    // check if tab file exists
    let Some(tab_file_path) = args.tab_file_path.as_deref().map(PathBuf::from) else {
        return Err(ConfigError("No input file provided".to_string()));
    };
    if !tab_file_path.exists() {
        let err = ConfigError(format!("Tab file not found {tab_file_path:?}"));
        return Err(err);
    }

    if args.inspect {
        return inspect_midi_file(&tab_file_path);
    }

    // command line > local config > defaults
    let tuning_name = args
        .tuning
        .as_deref()
        .or_else(|| local_config.get_tuning())
        .unwrap_or(STANDARD_TUNING.name);
    let tuning = local_config.resolve_tuning(tuning_name)?;
    let ticks_per_beat = args
        .ticks_per_beat
        .or_else(|| local_config.get_ticks_per_beat())
        .unwrap_or(DEFAULT_TICKS_PER_BEAT);
    let ticks_per_beat = check_ticks_per_beat(ticks_per_beat)?;
    let tempo = args
        .tempo
        .or_else(|| local_config.get_tempo())
        .unwrap_or(DEFAULT_TEMPO);
    let text = read_tab_file(&tab_file_path)?;
    let parser = TabParser::new(ParserContext::new(tuning, ticks_per_beat, tempo));
    let context = parser.context();
    log::info!(
        "Parsing {tab_file_path:?} with tuning '{tuning_name}' at {} BPM, {} ticks per slot",
        context.tempo,
        context.slot_ticks()
    );
    let notes = parser.parse(&text);
    log::info!("Parsed {} notes", notes.len());

    if args.print_staff {
        print!("{}", Staff::from_tab(&text));
    }
    if args.print_notes {
        print!("{}", NoteDump(&notes));
    }

    let output_path = args.output.map(PathBuf::from).unwrap_or_else(|| {
        default_output_path(&tab_file_path, local_config.get_output_folder())
    });
    write_midi_file(&notes, ticks_per_beat, &output_path)?;
    log::info!("MIDI file written to {output_path:?}");
    Ok(())
}

/// A slot lasts a quarter of a beat and the MIDI header holds 16 bits
fn check_ticks_per_beat(ticks_per_beat: u32) -> Result<u32, AppError> {
    if (MIN_TICKS_PER_BEAT..=u32::from(u16::MAX)).contains(&ticks_per_beat) {
        Ok(ticks_per_beat)
    } else {
        Err(ConfigError(format!(
            "Ticks per beat must be between {MIN_TICKS_PER_BEAT} and {}, got {ticks_per_beat}",
            u16::MAX
        )))
    }
}

/// Same file name with a `.mid` extension, in the output folder if configured
fn default_output_path(tab_file_path: &Path, output_folder: Option<PathBuf>) -> PathBuf {
    let output = tab_file_path.with_extension("mid");
    match (output_folder, output.file_name()) {
        (Some(folder), Some(file_name)) => folder.join(file_name),
        _ => output,
    }
}

fn list_tunings(local_config: &Config) {
    for preset in &TUNING_PRESETS {
        let strings: Vec<String> = preset
            .strings
            .iter()
            .map(|(label, pitch)| format!("{label}={pitch}"))
            .collect();
        println!("{} {}", preset.name, strings.join(" "));
    }
    for custom in local_config.custom_tunings() {
        let strings: Vec<String> = custom
            .strings
            .iter()
            .map(|string| format!("{}={}", string.label, string.pitch))
            .collect();
        println!("{} {} (custom)", custom.name, strings.join(" "));
    }
}

fn inspect_midi_file(path: &Path) -> Result<(), AppError> {
    let data = std::fs::read(path)?;
    let midi = parse_midi_data(&data)?;
    let note_offs = midi.events.iter().filter(|e| e.is_note_off()).count();
    println!(
        "format={} tracks={} ticks_per_beat={} note_ons={} note_offs={note_offs}",
        midi.format,
        midi.track_count,
        midi.ticks_per_beat,
        midi.note_on_count()
    );
    for (index, event) in midi.events.iter().enumerate() {
        let description = match event.event {
            MidiEventType::NoteOn(key, velocity) => {
                format!("note on key={key} velocity={velocity}")
            }
            MidiEventType::NoteOff(key, velocity) => {
                format!("note off key={key} velocity={velocity}")
            }
            MidiEventType::EndOfTrack => "end of track".to_string(),
        };
        println!("#{index} delta={} {description}", event.delta);
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the tab file (or MIDI file with --inspect).
    #[arg(required_unless_present = "list_tunings")]
    tab_file_path: Option<String>,
    /// Optional output path, defaults to the tab file name with a `.mid` extension.
    #[arg(short, long)]
    output: Option<String>,
    /// Tuning preset or custom tuning name.
    #[arg(long)]
    tuning: Option<String>,
    /// MIDI time resolution.
    #[arg(long)]
    ticks_per_beat: Option<u32>,
    /// Tempo in BPM (informational).
    #[arg(long)]
    tempo: Option<u32>,
    /// Print the parsed notes.
    #[arg(long, default_value_t = false)]
    print_notes: bool,
    /// Print the tab merged into one staff line per string.
    #[arg(long, default_value_t = false)]
    print_staff: bool,
    /// Decode and print a MIDI file instead of converting a tab.
    #[arg(long, default_value_t = false)]
    inspect: bool,
    /// List the available tunings.
    #[arg(long, default_value_t = false)]
    list_tunings: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<LibRuxError> for AppError {
    fn from(error: LibRuxError) -> Self {
        match error {
            LibRuxError::ParsingError(s) => Self::ParsingError(s),
            LibRuxError::ConfigError(s) => Self::ConfigError(s),
            LibRuxError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
