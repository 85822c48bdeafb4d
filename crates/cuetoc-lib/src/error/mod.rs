use crate::cue::error::CueError;
use crate::disc::error::DiscError;
use crate::toc::error::TocError;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueTocError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Could not determine the format of {0}, expected a .cue or .toc suffix")]
    UnknownFormat(PathBuf),

    #[error("Unknown format name: {0}, expected cue or toc")]
    UnknownFormatName(String),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    TocError(#[from] TocError),

    #[error(transparent)]
    DiscError(#[from] DiscError),
}

/// Coarse classification of a failure as reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownFormat,
    Io,
    Parse,
    CapacityExceeded,
    AllocationFailure,
}

impl CueTocError {
    pub fn kind(&self) -> ErrorKind {
        let disc_error = match self {
            CueTocError::IoError(_) => return ErrorKind::Io,
            CueTocError::UnknownFormat(_) | CueTocError::UnknownFormatName(_) => {
                return ErrorKind::UnknownFormat;
            }
            CueTocError::CueError(e) => e.disc_error(),
            CueTocError::TocError(e) => e.disc_error(),
            CueTocError::DiscError(e) => Some(e),
        };

        match disc_error {
            Some(DiscError::AllocationFailure(_)) => ErrorKind::AllocationFailure,
            Some(e) if e.is_capacity_exceeded() => ErrorKind::CapacityExceeded,
            _ => ErrorKind::Parse,
        }
    }
}

pub type CueTocResult<T> = result::Result<T, CueTocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_errors_inside_grammars_keep_their_kind() {
        let err: CueTocError = CueError::Disc {
            line: 4,
            source: DiscError::TooManyIndexes(99),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        let err: CueTocError = TocError::Disc {
            line: 200,
            source: DiscError::TooManyTracks,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    fn out_of_order_index_is_a_parse_error() {
        let err: CueTocError = CueError::Disc {
            line: 3,
            source: DiscError::IndexOutOfOrder {
                number: 2,
                offset: 10,
            },
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn io_and_format_kinds() {
        let err: CueTocError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(
            CueTocError::UnknownFormat(PathBuf::from("disc.txt")).kind(),
            ErrorKind::UnknownFormat
        );
        assert_eq!(
            CueTocError::from(DiscError::TooManyTracks).kind(),
            ErrorKind::CapacityExceeded
        );
    }
}
