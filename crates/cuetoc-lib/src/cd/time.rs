//! Conversions between absolute frame counts and minute/second/frame positions.
//!
//! A frame is 1/75 of a second (Red Book). Every function here works on owned
//! values only, so formatting never shares a buffer between callers.

use crate::cd::error::{TimeError, TimeResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;
use std::str::FromStr;

pub const FRAMES_PER_SECOND: u64 = 75;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const FRAMES_PER_MINUTE: u64 = FRAMES_PER_SECOND * SECONDS_PER_MINUTE;

lazy_static! {
    static ref MSF_PATTERN: Regex = Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Msf {
    pub minutes: u64,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    pub fn new(minutes: u64, seconds: u8, frames: u8) -> Self {
        Self {
            minutes,
            seconds,
            frames,
        }
    }

    pub fn from_frames(frame_count: u64) -> Self {
        let (minutes, seconds, frames) = msf_from_frames(frame_count);
        Self::new(minutes, seconds, frames)
    }

    pub fn to_frames(&self) -> u64 {
        frames_from_msf(self.minutes, self.seconds as u64, self.frames as u64)
    }

    /// Frame count, or `None` when it does not fit in a `u64`.
    pub fn checked_to_frames(&self) -> Option<u64> {
        self.minutes
            .checked_mul(FRAMES_PER_MINUTE)?
            .checked_add(self.seconds as u64 * FRAMES_PER_SECOND + self.frames as u64)
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

impl FromStr for Msf {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = MSF_PATTERN
            .captures(s.trim())
            .ok_or_else(|| TimeError::InvalidMSFFormat(s.to_string()))?;

        let minutes = captures[1]
            .parse::<u64>()
            .map_err(|_| TimeError::InvalidMSFFormat(s.to_string()))?;
        let seconds = captures[2]
            .parse::<u8>()
            .map_err(|_| TimeError::InvalidMSFFormat(s.to_string()))?;
        let frames = captures[3]
            .parse::<u8>()
            .map_err(|_| TimeError::InvalidMSFFormat(s.to_string()))?;

        if seconds as u64 >= SECONDS_PER_MINUTE || frames as u64 >= FRAMES_PER_SECOND {
            return Err(TimeError::OutOfRange(s.to_string()));
        }

        let msf = Msf::new(minutes, seconds, frames);
        if msf.checked_to_frames().is_none() {
            return Err(TimeError::OutOfRange(s.to_string()));
        }

        Ok(msf)
    }
}

pub fn frames_from_msf(minute: u64, second: u64, frame: u64) -> u64 {
    frame + (minute * SECONDS_PER_MINUTE + second) * FRAMES_PER_SECOND
}

pub fn msf_from_frames(frame_count: u64) -> (u64, u8, u8) {
    let minutes = frame_count / FRAMES_PER_MINUTE;
    let seconds = (frame_count / FRAMES_PER_SECOND) % SECONDS_PER_MINUTE;
    let frames = frame_count % FRAMES_PER_SECOND;

    (minutes, seconds as u8, frames as u8)
}

/// Splits a frame count into whole minutes and the remaining seconds,
/// keeping the sub-second part.
pub fn fractional_seconds_from_frames(frame_count: u64) -> (u64, f64) {
    let minutes = frame_count / FRAMES_PER_MINUTE;
    let remaining = frame_count % FRAMES_PER_MINUTE;

    (minutes, remaining as f64 / FRAMES_PER_SECOND as f64)
}

/// Canonical `mm:ss:ff` rendering.
pub fn mmssff_string(frame_count: u64) -> String {
    Msf::from_frames(frame_count).to_string()
}

/// Parses an `mm:ss:ff` literal into a frame count.
pub fn parse_mmssff(text: &str) -> TimeResult<u64> {
    text.parse::<Msf>()?
        .checked_to_frames()
        .ok_or_else(|| TimeError::OutOfRange(text.to_string()))
}

/// `mm:ss.ff` rendering used for breakpoint lists.
pub fn msf_dotted_string(frame_count: u64) -> String {
    let (minutes, seconds, frames) = msf_from_frames(frame_count);
    format!("{minutes:02}:{seconds:02}.{frames:02}")
}

/// `mm:ss.mmm` rendering with millisecond precision.
pub fn ms_string(frame_count: u64) -> String {
    let (minutes, seconds) = fractional_seconds_from_frames(frame_count);
    format!("{minutes:02}:{seconds:06.3}")
}
