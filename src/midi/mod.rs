pub mod midi_builder;
pub mod midi_event;
pub mod midi_file;
pub mod midi_parser;
