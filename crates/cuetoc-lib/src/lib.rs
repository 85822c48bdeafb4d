pub mod cd;
pub mod cue;
pub mod disc;
pub mod error;
pub mod format;
pub mod toc;

pub use disc::{Disc, Track};
pub use error::{CueTocError, CueTocResult, ErrorKind};
pub use format::Format;
