use crate::commands::breakpoints::BreakpointsCommand;
use crate::input::{BatchError, load_all, operands, report_failure};
use cuetoc_lib::Disc;
use cuetoc_lib::cd::time::{ms_string, msf_dotted_string};

/// Where a track's pregap is attributed when reporting breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapMode {
    /// Pregap belongs to the previous track
    #[default]
    Append,
    /// Net length of each track instead of breakpoints
    Length,
    /// Pregap belongs to its own track
    Prepend,
    /// Breakpoints at both ends of each track
    Split,
}

pub async fn print_breakpoints(cmd: BreakpointsCommand) -> anyhow::Result<()> {
    let gaps = cmd.gap_mode();
    let paths = operands(cmd.inputs);
    let discs = load_all(&paths, cmd.input_format).await;

    let mut failed = 0;
    for (path, disc) in paths.iter().zip(discs) {
        match disc {
            Ok(disc) => {
                for line in breakpoint_lines(&disc, gaps, cmd.millisecond) {
                    println!("{line}");
                }
            }
            Err(e) => {
                report_failure(path, e.kind(), &e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(BatchError {
            failed,
            total: paths.len(),
        }
        .into());
    }

    Ok(())
}

pub fn breakpoint_lines(disc: &Disc, gaps: GapMode, millisecond: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, track) in disc.tracks().iter().enumerate() {
        let start = track.start().unwrap_or(0);
        let length = track.length().unwrap_or(0);

        match gaps {
            GapMode::Append => lines.extend(breakpoint(start, millisecond)),
            GapMode::Length => {
                let rendered = breakpoint(length, millisecond).unwrap_or_default();
                lines.push(format!("{}\t{rendered}", i + 1));
            }
            GapMode::Prepend => {
                let gap_start = match track.index(0) {
                    Some(index0) => index0,
                    None => start.saturating_sub(track.zero_pre().unwrap_or(0)),
                };
                lines.extend(breakpoint(gap_start, millisecond));
            }
            GapMode::Split => {
                lines.extend(breakpoint(start, millisecond));
                if length > 0 {
                    lines.extend(breakpoint(start.saturating_add(length), millisecond));
                }
            }
        }
    }

    lines
}

/// Zero breakpoints are not reported.
fn breakpoint(frames: u64, millisecond: bool) -> Option<String> {
    if frames == 0 {
        return None;
    }

    Some(if millisecond {
        ms_string(frames)
    } else {
        msf_dotted_string(frames)
    })
}
