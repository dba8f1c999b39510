//! Error types for the ruxtab library

use std::io;

/// Library error type for ruxtab operations
#[derive(Debug, thiserror::Error)]
pub enum RuxError {
    /// Parsing error when reading back an encoded MIDI file
    #[error("parsing error: {0}")]
    ParsingError(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for RuxError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
