use crate::commands::print::PrintCommand;
use crate::cueprint::template::{FieldValue, Template, translate_escapes};
use crate::input::{BatchError, load_all, operands, report_failure};
use cuetoc_lib::disc::cdtext::{Pti, RemKey};
use cuetoc_lib::{Disc, ErrorKind, Track};
use thiserror::Error;

pub mod template;

pub const DISC_TEMPLATE: &str = "Disc Information\n\
arranger:\t%A\n\
composer:\t%C\n\
genre:\t\t%G\n\
message:\t%M\n\
no. of tracks:\t%N\n\
performer:\t%P\n\
songwriter:\t%S\n\
title:\t\t%T\n\
disc no.:\t%D\n\
year/date:\t%Y\n\
UPC/EAN:\t%U\n";

pub const TRACK_TEMPLATE: &str = "Track %n Information\n\
arranger:\t%a\n\
composer:\t%c\n\
genre:\t\t%g\n\
ISRC:\t\t%i\n\
message:\t%m\n\
track number:\t%n\n\
performer:\t%p\n\
title:\t\t%t\n\
ISRC (CD-TEXT):\t%u\n";

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Track number {number} is out of range, the disc has {count} tracks")]
    TrackOutOfRange { number: usize, count: usize },
}

pub struct Templates {
    pub disc: Template,
    pub track: Template,
}

impl Templates {
    /// Without any template both defaults apply, otherwise a missing template prints nothing.
    pub fn from_args(disc: Option<&str>, track: Option<&str>) -> Self {
        let (disc, track) = match (disc, track) {
            (None, None) => (DISC_TEMPLATE, TRACK_TEMPLATE),
            (disc, track) => (disc.unwrap_or(""), track.unwrap_or("")),
        };

        Self {
            disc: Template::parse(&translate_escapes(disc)),
            track: Template::parse(&translate_escapes(track)),
        }
    }
}

pub async fn print_info(cmd: PrintCommand) -> anyhow::Result<()> {
    let templates = Templates::from_args(cmd.disc_template.as_deref(), cmd.track_template.as_deref());
    let paths = operands(cmd.inputs);
    let discs = load_all(&paths, cmd.input_format).await;

    let mut failed = 0;
    for (path, disc) in paths.iter().zip(discs) {
        let rendered = match disc {
            Ok(disc) => report(&disc, cmd.track_number, &templates),
            Err(e) => {
                report_failure(path, e.kind(), &e);
                failed += 1;
                continue;
            }
        };

        match rendered {
            Ok(text) => print!("{text}"),
            Err(e) => {
                report_failure(path, ErrorKind::Parse, &e);
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

/// Disc and track information for a whole disc, the disc only (`Some(0)`) or a single track.
pub fn report(disc: &Disc, track_number: Option<usize>, templates: &Templates) -> Result<String, PrintError> {
    match track_number {
        None => {
            let mut text = render_disc(&templates.disc, disc);
            for number in 1..=disc.track_count() {
                text.push_str(&render_track(&templates.track, disc, number));
            }
            Ok(text)
        }
        Some(0) => Ok(render_disc(&templates.disc, disc)),
        Some(number) if number <= disc.track_count() => Ok(render_track(&templates.track, disc, number)),
        Some(number) => Err(PrintError::TrackOutOfRange {
            number,
            count: disc.track_count(),
        }),
    }
}

pub fn render_disc(template: &Template, disc: &Disc) -> String {
    template.render(|key| disc_field(disc, key))
}

pub fn render_track(template: &Template, disc: &Disc, number: usize) -> String {
    match disc.track(number) {
        Some(track) => template.render(|key| track_field(disc, track, number, key)),
        None => String::new(),
    }
}

fn disc_field(disc: &Disc, key: char) -> FieldValue<'_> {
    let cdtext = &disc.cdtext;
    match key {
        'A' | 'R' => FieldValue::Text(cdtext.get(Pti::Arranger)),
        'C' => FieldValue::Text(cdtext.get(Pti::Composer)),
        'D' => FieldValue::Text(cdtext.remark(RemKey::DiscNumber)),
        'G' => FieldValue::Text(cdtext.get(Pti::Genre)),
        'M' => FieldValue::Text(cdtext.get(Pti::Message)),
        'N' => FieldValue::Number(disc.track_count()),
        'P' => FieldValue::Text(cdtext.get(Pti::Performer)),
        'S' => FieldValue::Text(cdtext.get(Pti::Songwriter)),
        'T' => FieldValue::Text(cdtext.get(Pti::Title)),
        'U' => FieldValue::Text(cdtext.get(Pti::UpcIsrc)),
        'Y' => FieldValue::Text(cdtext.remark(RemKey::Date)),
        other => FieldValue::Char(other),
    }
}

fn track_field<'a>(disc: &'a Disc, track: &'a Track, number: usize, key: char) -> FieldValue<'a> {
    let cdtext = &track.cdtext;
    match key {
        'a' => FieldValue::Text(cdtext.get(Pti::Arranger)),
        'c' => FieldValue::Text(cdtext.get(Pti::Composer)),
        'f' => FieldValue::Text(track.filename()),
        'g' => FieldValue::Text(cdtext.get(Pti::Genre).or(disc.cdtext.get(Pti::Genre))),
        'i' => FieldValue::Text(track.isrc.as_deref()),
        'm' => FieldValue::Text(cdtext.get(Pti::Message)),
        'n' => FieldValue::Number(number),
        'p' => FieldValue::Text(cdtext.get(Pti::Performer).or(disc.cdtext.get(Pti::Performer))),
        's' => FieldValue::Text(cdtext.get(Pti::Songwriter)),
        't' => FieldValue::Text(cdtext.get(Pti::Title)),
        'u' => FieldValue::Text(cdtext.get(Pti::UpcIsrc)),
        other => disc_field(disc, other),
    }
}
