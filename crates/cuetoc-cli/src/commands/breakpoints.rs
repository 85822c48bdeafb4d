use crate::breakpoints::GapMode;
use clap::Parser;
use cuetoc_lib::Format;
use std::path::PathBuf;

/// Reports track breakpoints from CUE sheets and TOC files.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct BreakpointsCommand {
    /// Input files, standard input when none are given
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Format of the input files, detected from their suffix when omitted
    #[arg(long, short = 'i', value_name = "FORMAT")]
    pub input_format: Option<Format>,

    /// Print the net length of each track
    #[arg(long, short = 'l', conflicts_with_all = ["prepend_gaps", "split_gaps"])]
    pub length: bool,

    /// Prefix pregaps to their track
    #[arg(long, short = 'p', conflicts_with = "split_gaps")]
    pub prepend_gaps: bool,

    /// Split at the beginning and the end of pregaps
    #[arg(long, short = 's')]
    pub split_gaps: bool,

    /// Print mm:ss.nnn (milliseconds) instead of mm:ss.ff (frames)
    #[arg(long, short = 'm')]
    pub millisecond: bool,
}

impl BreakpointsCommand {
    pub fn gap_mode(&self) -> GapMode {
        if self.length {
            GapMode::Length
        } else if self.prepend_gaps {
            GapMode::Prepend
        } else if self.split_gaps {
            GapMode::Split
        } else {
            GapMode::Append
        }
    }
}
