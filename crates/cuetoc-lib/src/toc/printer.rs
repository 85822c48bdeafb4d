use crate::cd::time::mmssff_string;
use crate::cd::{DiscMode, SubMode, TrackFlags, TrackMode};
use crate::disc::cdtext::{Cdtext, Pti};
use crate::disc::{Disc, Track};
use std::fmt::{self, Display, Formatter};

/// Writes a disc in TOC description syntax.
///
/// Remarks, the CD-TEXT file name and the SCMS flag have no TOC form and are left out.
pub struct TocPrinter<'a> {
    disc: &'a Disc,
}

impl<'a> TocPrinter<'a> {
    pub fn new(disc: &'a Disc) -> Self {
        Self { disc }
    }

    fn write_cdtext_fields(f: &mut Formatter<'_>, cdtext: &Cdtext, is_track: bool) -> fmt::Result {
        for (pti, value) in cdtext.fields() {
            let Some(key) = pti.key(is_track) else {
                continue;
            };
            writeln!(f, "\t\t{key} {}", cdtext_value(pti, value))?;
        }
        Ok(())
    }

    fn write_track(f: &mut Formatter<'_>, track: &Track) -> fmt::Result {
        write!(f, "TRACK {}", track_mode_name(track.mode))?;
        if track.sub_mode == SubMode::RwRaw {
            write!(f, " RW_RAW")?;
        }
        writeln!(f)?;

        if track.flags.is_set(TrackFlags::PRE_EMPHASIS) {
            writeln!(f, "PRE_EMPHASIS")?;
        }
        if track.flags.is_set(TrackFlags::COPY_PERMITTED) {
            writeln!(f, "COPY")?;
        }
        if track.flags.is_set(TrackFlags::FOUR_CHANNEL) {
            writeln!(f, "FOUR_CHANNEL_AUDIO")?;
        }

        if let Some(isrc) = &track.isrc {
            writeln!(f, "ISRC \"{}\"", escape(isrc))?;
        }

        if track.cdtext.has_text() {
            writeln!(f, "CD_TEXT {{")?;
            writeln!(f, "\tLANGUAGE 0 {{")?;
            Self::write_cdtext_fields(f, &track.cdtext, true)?;
            writeln!(f, "\t}}")?;
            writeln!(f, "}}")?;
        }

        if let Some(pre_gap) = track.zero_pre().filter(|len| *len > 0) {
            writeln!(f, "ZERO {}", mmssff_string(pre_gap))?;
        }

        let start = track.start().unwrap_or(0);
        if let Some(name) = track.filename() {
            write!(f, "FILE \"{}\" ", escape(name))?;

            match track.index(0).filter(|index0| *index0 <= start) {
                Some(index0) => {
                    let lead_in = start - index0;
                    write!(f, "{}", start_string(index0))?;
                    if let Some(length) = track.length() {
                        write!(f, " {}", mmssff_string(length.saturating_add(lead_in)))?;
                    }
                    writeln!(f)?;
                    writeln!(f, "START {}", mmssff_string(lead_in))?;
                }
                None => {
                    write!(f, "{}", start_string(start))?;
                    if let Some(length) = track.length() {
                        write!(f, " {}", mmssff_string(length))?;
                    }
                    writeln!(f)?;
                }
            }
        }

        if let Some(post_gap) = track.zero_post().filter(|len| *len > 0) {
            writeln!(f, "ZERO {}", mmssff_string(post_gap))?;
        }

        let base = track.index(0).unwrap_or(start);
        for (_, offset) in track.indexes().filter(|(number, _)| *number > 1) {
            writeln!(f, "INDEX {}", mmssff_string(offset.saturating_sub(base)))?;
        }

        Ok(())
    }
}

impl Display for TocPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let disc = self.disc;

        writeln!(f, "{}", disc_mode_name(disc.mode))?;

        if let Some(catalog) = &disc.catalog {
            writeln!(f, "CATALOG \"{}\"", escape(catalog))?;
        }

        if disc.cdtext.has_text() {
            writeln!(f, "CD_TEXT {{")?;
            writeln!(f, "\tLANGUAGE_MAP {{ 0:9 }}")?;
            writeln!(f, "\tLANGUAGE 0 {{")?;
            Self::write_cdtext_fields(f, &disc.cdtext, false)?;
            writeln!(f, "\t}}")?;
            writeln!(f, "}}")?;
        }

        for track in disc.tracks() {
            writeln!(f)?;
            Self::write_track(f, track)?;
        }

        Ok(())
    }
}

pub fn disc_mode_name(mode: DiscMode) -> &'static str {
    match mode {
        DiscMode::CdDa => "CD_DA",
        DiscMode::CdRom => "CD_ROM",
        DiscMode::CdRomXa => "CD_ROM_XA",
    }
}

pub fn track_mode_name(mode: TrackMode) -> &'static str {
    match mode {
        TrackMode::Audio => "AUDIO",
        TrackMode::Mode1 => "MODE1",
        TrackMode::Mode1Raw => "MODE1_RAW",
        TrackMode::Mode2 => "MODE2",
        TrackMode::Mode2Form1 => "MODE2_FORM1",
        TrackMode::Mode2Form2 => "MODE2_FORM2",
        TrackMode::Mode2FormMix => "MODE2_FORM_MIX",
        TrackMode::Mode2Raw => "MODE2_RAW",
    }
}

fn start_string(frames: u64) -> String {
    if frames == 0 {
        "0".to_string()
    } else {
        mmssff_string(frames)
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Binary slots holding a decimal byte list go back out in brace form.
fn cdtext_value(pti: Pti, value: &str) -> String {
    let is_byte_list = pti.is_binary()
        && !value.is_empty()
        && value.split(',').all(|byte| byte.parse::<u8>().is_ok());

    if is_byte_list {
        format!("{{{}}}", value.split(',').collect::<Vec<_>>().join(", "))
    } else {
        format!("\"{}\"", escape(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cd::time::frames_from_msf;
    use crate::disc::cdtext::RemKey;

    #[test]
    fn prints_disc_header_with_cdtext_envelope() {
        let mut disc = Disc::new();
        disc.catalog = Some("0724384260927".to_string());
        disc.cdtext.set(Pti::Title, "Loveless");
        disc.cdtext.set(Pti::UpcIsrc, "0724384260927");
        disc.cdtext.set_remark(RemKey::Date, "1991");
        disc.cdtext_file = Some("disc.cdt".to_string());

        let expected = "CD_DA\n\
            CATALOG \"0724384260927\"\n\
            CD_TEXT {\n\
            \tLANGUAGE_MAP { 0:9 }\n\
            \tLANGUAGE 0 {\n\
            \t\tTITLE \"Loveless\"\n\
            \t\tUPC_EAN \"0724384260927\"\n\
            \t}\n\
            }\n";

        assert_eq!(TocPrinter::new(&disc).to_string(), expected);
    }

    #[test]
    fn empty_cdtext_has_no_block() {
        let mut disc = Disc::new();
        disc.cdtext.set_remark(RemKey::Date, "1991");
        assert_eq!(TocPrinter::new(&disc).to_string(), "CD_DA\n");
    }

    #[test]
    fn prints_track_with_start_and_gaps() {
        let mut disc = Disc::new();
        disc.mode = DiscMode::CdRom;
        let track = disc.add_track().unwrap();
        track.set_mode(TrackMode::Audio);
        track.sub_mode = SubMode::RwRaw;
        track.flags.set(TrackFlags::PRE_EMPHASIS | TrackFlags::SCMS);
        track.isrc = Some("USRC17607839".to_string());
        track.cdtext.set(Pti::Title, "Only \"Shallow\"");
        track.cdtext.set(Pti::UpcIsrc, "USRC17607839");
        track.pre_gap.length = Some(150);
        track.post_gap.length = Some(0);
        track.file.name = Some("a.wav".to_string());
        track.file.start = Some(frames_from_msf(1, 2, 0));
        track.file.length = Some(frames_from_msf(3, 0, 0));
        track.set_index(0, frames_from_msf(1, 0, 0)).unwrap();
        track.set_index(1, frames_from_msf(1, 2, 0)).unwrap();
        track.set_index(2, frames_from_msf(2, 0, 0)).unwrap();

        let expected = "CD_ROM\n\
            \n\
            TRACK AUDIO RW_RAW\n\
            PRE_EMPHASIS\n\
            ISRC \"USRC17607839\"\n\
            CD_TEXT {\n\
            \tLANGUAGE 0 {\n\
            \t\tTITLE \"Only \\\"Shallow\\\"\"\n\
            \t\tISRC \"USRC17607839\"\n\
            \t}\n\
            }\n\
            ZERO 00:02:00\n\
            FILE \"a.wav\" 01:00:00 03:02:00\n\
            START 00:02:00\n\
            INDEX 01:00:00\n";

        assert_eq!(TocPrinter::new(&disc).to_string(), expected);
    }

    #[test]
    fn zero_start_is_printed_literally() {
        let mut disc = Disc::new();
        let track = disc.add_track().unwrap();
        track.file.name = Some("a.wav".to_string());
        track.file.start = Some(0);
        track.set_index(1, 0).unwrap();

        let output = TocPrinter::new(&disc).to_string();
        assert!(output.ends_with("TRACK AUDIO\nFILE \"a.wav\" 0\n"));
    }

    #[test]
    fn index_zero_at_track_start_still_gets_start_line() {
        let mut disc = Disc::new();
        let track = disc.add_track().unwrap();
        track.file.name = Some("a.wav".to_string());
        track.file.start = Some(300);
        track.set_index(0, 300).unwrap();
        track.set_index(1, 300).unwrap();

        let output = TocPrinter::new(&disc).to_string();
        assert!(output.ends_with("FILE \"a.wav\" 00:04:00\nSTART 00:00:00\n"));
    }

    #[test]
    fn byte_list_slots_keep_brace_form() {
        assert_eq!(cdtext_value(Pti::Genre, "0,25,0"), "{0, 25, 0}");
        assert_eq!(cdtext_value(Pti::Genre, "Alternative"), "\"Alternative\"");
        assert_eq!(cdtext_value(Pti::Title, "1,2"), "\"1,2\"");
    }
}
