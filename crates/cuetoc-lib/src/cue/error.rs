use crate::cd::error::TimeError;
use crate::disc::error::DiscError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error("line {line}: unknown file type: {value}")]
    InvalidFileType { line: usize, value: String },

    #[error("line {line}: unknown track type: {value}")]
    InvalidTrackType { line: usize, value: String },

    #[error("line {line}: unknown track flag: {value}")]
    InvalidFlag { line: usize, value: String },

    #[error("line {line}: invalid number: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: {value} is out of range for {keyword}")]
    OutOfRange {
        line: usize,
        keyword: String,
        value: u32,
    },

    #[error("line {line}: {source}")]
    InvalidTime {
        line: usize,
        #[source]
        source: TimeError,
    },

    #[error("line {line}: missing closing quote")]
    MissingQuoteError { line: usize },

    #[error("line {line}: {keyword} expects {expected}")]
    MissingArgument {
        line: usize,
        keyword: String,
        expected: &'static str,
    },

    #[error("line {line}: {keyword} is only valid after a TRACK statement")]
    NoTrackContext { line: usize, keyword: String },

    #[error("line {line}: {keyword} must appear before the first TRACK statement")]
    NotGlobal { line: usize, keyword: String },

    #[error("line {line}: unknown statement: {keyword}")]
    UnknownStatement { line: usize, keyword: String },

    #[error("line {line}: {source}")]
    Disc {
        line: usize,
        #[source]
        source: DiscError,
    },
}

impl CueError {
    pub fn line(&self) -> usize {
        match self {
            CueError::InvalidFileType { line, .. }
            | CueError::InvalidTrackType { line, .. }
            | CueError::InvalidFlag { line, .. }
            | CueError::InvalidNumber { line, .. }
            | CueError::OutOfRange { line, .. }
            | CueError::InvalidTime { line, .. }
            | CueError::MissingQuoteError { line }
            | CueError::MissingArgument { line, .. }
            | CueError::NoTrackContext { line, .. }
            | CueError::NotGlobal { line, .. }
            | CueError::UnknownStatement { line, .. }
            | CueError::Disc { line, .. } => *line,
        }
    }

    /// The model error behind this parse failure, if any.
    pub fn disc_error(&self) -> Option<&DiscError> {
        match self {
            CueError::Disc { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type CueResult<T> = Result<T, CueError>;
