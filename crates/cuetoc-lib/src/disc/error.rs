use crate::cd::{MAX_INDEXES, MAX_TRACKS};
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscError {
    #[error("Too many tracks, a disc holds at most {MAX_TRACKS}")]
    TooManyTracks,

    #[error("Index {0} is out of range, a track holds at most {MAX_INDEXES} indexes")]
    TooManyIndexes(u8),

    #[error("Index {number} at frame {offset} breaks the ordering of the track's indexes")]
    IndexOutOfOrder { number: u8, offset: u64 },

    #[error(transparent)]
    AllocationFailure(#[from] TryReserveError),
}

impl DiscError {
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, DiscError::TooManyTracks | DiscError::TooManyIndexes(_))
    }
}

pub type DiscResult<T> = Result<T, DiscError>;
