use crate::commands::breakpoints::BreakpointsCommand;
use crate::commands::convert::ConvertCommand;
use crate::commands::print::PrintCommand;
use clap::{Parser, Subcommand};

pub mod breakpoints;
pub mod convert;
pub mod print;

/// CLI for converting and inspecting CUE sheets and TOC files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Convert(ConvertCommand),
    Breakpoints(BreakpointsCommand),
    Print(PrintCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoints::GapMode;
    use cuetoc_lib::Format;
    use std::path::PathBuf;

    #[test]
    fn parses_convert_arguments() {
        let cli = Cli::try_parse_from([
            "cuetoc", "convert", "a.cue", "b.cue", "-o", "toc", "--force",
        ])
        .unwrap();

        let Commands::Convert(cmd) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(cmd.inputs, vec![PathBuf::from("a.cue"), PathBuf::from("b.cue")]);
        assert_eq!(cmd.output_format, Some(Format::Toc));
        assert_eq!(cmd.input_format, None);
        assert!(cmd.force);
    }

    #[test]
    fn rejects_unknown_format_names() {
        assert!(Cli::try_parse_from(["cuetoc", "convert", "a.cue", "-i", "bin"]).is_err());
    }

    #[test]
    fn gap_modes_are_exclusive() {
        let cli = Cli::try_parse_from(["cuetoc", "breakpoints", "--split-gaps", "a.toc"]).unwrap();
        let Commands::Breakpoints(cmd) = cli.command else {
            panic!("expected breakpoints");
        };
        assert_eq!(cmd.gap_mode(), GapMode::Split);

        assert!(Cli::try_parse_from(["cuetoc", "breakpoints", "-l", "-p"]).is_err());
    }

    #[test]
    fn print_accepts_templates() {
        let cli = Cli::try_parse_from(["cuetoc", "print", "-n", "2", "-t", "%n %t\\n"]).unwrap();
        let Commands::Print(cmd) = cli.command else {
            panic!("expected print");
        };
        assert_eq!(cmd.track_number, Some(2));
        assert_eq!(cmd.track_template.as_deref(), Some("%n %t\\n"));
        assert!(cmd.inputs.is_empty());
    }
}
