use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid MSF format: {0}")]
    InvalidMSFFormat(String),

    #[error("MSF field out of range: {0}")]
    OutOfRange(String),
}

pub type TimeResult<T> = Result<T, TimeError>;
