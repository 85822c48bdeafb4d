use clap::Parser;
use cuetoc_lib::Format;
use std::path::PathBuf;

/// Converts CUE sheets to TOC files and back.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ConvertCommand {
    /// Input files, `-` reads standard input
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file path, `-` writes standard output. Only valid with a single input
    #[arg(long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Format of the input files, detected from their suffix when omitted
    #[arg(long, short = 'i', value_name = "FORMAT")]
    pub input_format: Option<Format>,

    /// Format to write, defaults to the other dialect of each input
    #[arg(long, short = 'o', value_name = "FORMAT")]
    pub output_format: Option<Format>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', default_value_t = false)]
    pub force: bool,
}
