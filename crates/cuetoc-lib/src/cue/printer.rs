use crate::cd::time::mmssff_string;
use crate::cd::{TrackFlags, TrackMode};
use crate::disc::cdtext::{Cdtext, Pti};
use crate::disc::{Disc, FileType, Track};
use log::debug;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

const TRACK_INDENT: &str = "  ";
const STATEMENT_INDENT: &str = "    ";

/// Writes a disc in CUE sheet syntax. Index positions are absolute within each file.
pub struct CuePrinter<'a> {
    disc: &'a Disc,
}

impl<'a> CuePrinter<'a> {
    pub fn new(disc: &'a Disc) -> Self {
        Self { disc }
    }

    fn write_cdtext(f: &mut Formatter<'_>, cdtext: &Cdtext, indent: &str) -> fmt::Result {
        for (key, value) in cdtext.remarks() {
            writeln!(f, "{indent}REM {} {}", key.name(), quote(value))?;
        }
        if let Some(genre) = cdtext.get(Pti::Genre) {
            writeln!(f, "{indent}REM GENRE {}", quote(genre))?;
        }

        for (pti, value) in cdtext.fields() {
            if pti == Pti::Genre {
                continue;
            }
            // UPC_EAN keeps track ISRC text apart from the track's own ISRC statement
            if let Some(key) = pti.key(false) {
                writeln!(f, "{indent}{key} {}", quote(value))?;
            }
        }

        Ok(())
    }

    fn write_track(f: &mut Formatter<'_>, number: usize, track: &Track) -> fmt::Result {
        writeln!(
            f,
            "{TRACK_INDENT}TRACK {number:02} {}",
            track_type_name(track.mode)
        )?;

        Self::write_cdtext(f, &track.cdtext, STATEMENT_INDENT)?;

        let flags = flag_names(track.flags);
        if !flags.is_empty() {
            writeln!(f, "{STATEMENT_INDENT}FLAGS {}", flags.join(" "))?;
        }
        if let Some(isrc) = &track.isrc {
            writeln!(f, "{STATEMENT_INDENT}ISRC {}", quote(isrc))?;
        }

        if let Some(pre_gap) = track.zero_pre().filter(|len| *len > 0) {
            writeln!(f, "{STATEMENT_INDENT}PREGAP {}", mmssff_string(pre_gap))?;
        }

        if let Some(index0) = track.index(0) {
            writeln!(f, "{STATEMENT_INDENT}INDEX 00 {}", mmssff_string(index0))?;
        }
        if let Some(index1) = track.index(1).or(track.start()) {
            writeln!(f, "{STATEMENT_INDENT}INDEX 01 {}", mmssff_string(index1))?;
        }
        for (number, offset) in track.indexes().filter(|(number, _)| *number > 1) {
            writeln!(
                f,
                "{STATEMENT_INDENT}INDEX {number:02} {}",
                mmssff_string(offset)
            )?;
        }

        if let Some(post_gap) = track.zero_post().filter(|len| *len > 0) {
            writeln!(f, "{STATEMENT_INDENT}POSTGAP {}", mmssff_string(post_gap))?;
        }

        Ok(())
    }
}

impl Display for CuePrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let disc = self.disc;

        Self::write_cdtext(f, &disc.cdtext, "")?;
        if let Some(catalog) = &disc.catalog {
            writeln!(f, "CATALOG {catalog}")?;
        }
        if let Some(cdtext_file) = &disc.cdtext_file {
            writeln!(f, "CDTEXTFILE \"{}\"", without_quotes(cdtext_file))?;
        }

        let mut current_file: Option<&str> = None;
        for (i, track) in disc.tracks().iter().enumerate() {
            if let Some(name) = track.filename() {
                if current_file != Some(name) {
                    let file_type = track
                        .file
                        .file_type
                        .unwrap_or_else(|| FileType::from_file_name(name));
                    writeln!(
                        f,
                        "FILE \"{}\" {}",
                        without_quotes(name),
                        file_type_name(file_type)
                    )?;
                    current_file = Some(name);
                }
            }

            Self::write_track(f, i + 1, track)?;
        }

        Ok(())
    }
}

pub fn track_type_name(mode: TrackMode) -> &'static str {
    match mode {
        TrackMode::Audio => "AUDIO",
        TrackMode::Mode1 => "MODE1/2048",
        TrackMode::Mode1Raw => "MODE1/2352",
        TrackMode::Mode2 => "MODE2/2336",
        TrackMode::Mode2Form1 => "MODE2/2048",
        TrackMode::Mode2Form2 => "MODE2/2324",
        TrackMode::Mode2FormMix => "MODE2/2332",
        TrackMode::Mode2Raw => "MODE2/2352",
    }
}

pub fn file_type_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Binary => "BINARY",
        FileType::Motorola => "MOTOROLA",
        FileType::Aiff => "AIFF",
        FileType::Wave => "WAVE",
        FileType::Mp3 => "MP3",
        FileType::Flac => "FLAC",
    }
}

fn flag_names(flags: TrackFlags) -> Vec<&'static str> {
    [
        (TrackFlags::COPY_PERMITTED, "DCP"),
        (TrackFlags::FOUR_CHANNEL, "4CH"),
        (TrackFlags::PRE_EMPHASIS, "PRE"),
        (TrackFlags::SCMS, "SCMS"),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.is_set(*flag))
    .map(|(_, name)| name)
    .collect()
}

fn quote(value: &str) -> String {
    let value = without_quotes(value);
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.into_owned()
    }
}

/// CUE strings cannot escape a double quote, so it is written as a single quote.
fn without_quotes(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        debug!("replacing double quotes in {value:?}");
        Cow::Owned(value.replace('"', "'"))
    } else {
        Cow::Borrowed(value)
    }
}
