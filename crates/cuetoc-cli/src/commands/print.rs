use clap::Parser;
use cuetoc_lib::Format;
use std::path::PathBuf;

/// Reports disc and track information from CUE sheets and TOC files using templates.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct PrintCommand {
    /// Input files, standard input when none are given
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Format of the input files, detected from their suffix when omitted
    #[arg(long, short = 'i', value_name = "FORMAT")]
    pub input_format: Option<Format>,

    /// Only print information for this track, 0 prints the disc information only
    #[arg(long, short = 'n', value_name = "NUMBER")]
    pub track_number: Option<usize>,

    /// Disc template
    #[arg(long, short = 'd', value_name = "TEMPLATE")]
    pub disc_template: Option<String>,

    /// Track template
    #[arg(long, short = 't', value_name = "TEMPLATE")]
    pub track_template: Option<String>,
}
