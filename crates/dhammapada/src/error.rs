//! Errors raised while reading the verse text

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while scanning the corpus
///
/// Line numbers are 1-indexed. The type is `Clone` so the result of the
/// one-time parse of the embedded text can be handed out on every call.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    #[error("Failed to read corpus at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("Invalid verse number '{number}' at line {line}")]
    InvalidVerseNumber { line: usize, number: String },

    #[error("Verse {verse} starts twice: line {first} and line {line}")]
    DuplicateVerse { verse: u32, first: usize, line: usize },
}

impl ScanError {
    pub fn io(line: usize, err: io::Error) -> Self {
        ScanError::Io {
            line,
            source: Arc::new(err),
        }
    }

    /// Line the error was raised on
    pub fn line(&self) -> usize {
        match self {
            ScanError::Io { line, .. }
            | ScanError::InvalidVerseNumber { line, .. }
            | ScanError::DuplicateVerse { line, .. } => *line,
        }
    }
}
