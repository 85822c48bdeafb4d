use crate::cd::error::TimeError;
use crate::disc::error::DiscError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TocError {
    #[error("line {line}: unexpected character '{character}'")]
    UnexpectedCharacter { line: usize, character: char },

    #[error("line {line}: missing closing quote")]
    UnterminatedString { line: usize },

    #[error("line {line}: invalid number: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: expected {expected}, found end of input")]
    UnexpectedEnd { line: usize, expected: &'static str },

    #[error("line {line}: {source}")]
    InvalidTime {
        line: usize,
        #[source]
        source: TimeError,
    },

    #[error("line {line}: {keyword} is only valid after a TRACK statement")]
    NoTrackContext { line: usize, keyword: String },

    #[error("line {line}: {keyword} must appear before the first TRACK statement")]
    NotGlobal { line: usize, keyword: String },

    #[error("line {line}: {keyword} needs a preceding file statement in the same track")]
    NoFile { line: usize, keyword: String },

    #[error("line {line}: START offset {start} exceeds the file length {length}")]
    StartBeyondLength { line: usize, start: u64, length: u64 },

    #[error("line {line}: {source}")]
    Disc {
        line: usize,
        #[source]
        source: DiscError,
    },
}

impl TocError {
    pub fn line(&self) -> usize {
        match self {
            TocError::UnexpectedCharacter { line, .. }
            | TocError::UnterminatedString { line }
            | TocError::InvalidNumber { line, .. }
            | TocError::UnexpectedToken { line, .. }
            | TocError::UnexpectedEnd { line, .. }
            | TocError::InvalidTime { line, .. }
            | TocError::NoTrackContext { line, .. }
            | TocError::NotGlobal { line, .. }
            | TocError::NoFile { line, .. }
            | TocError::StartBeyondLength { line, .. }
            | TocError::Disc { line, .. } => *line,
        }
    }

    pub fn disc_error(&self) -> Option<&DiscError> {
        match self {
            TocError::Disc { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type TocResult<T> = Result<T, TocError>;
