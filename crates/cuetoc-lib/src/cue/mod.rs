use crate::cd::time::parse_mmssff;
use crate::cd::{DiscMode, TrackFlags, TrackMode};
use crate::cue::error::{CueError, CueResult};
use crate::cue::lexer::{Token, tokenize};
use crate::disc::cdtext::{Pti, RemKey};
use crate::disc::{Disc, FileType, Track};
use log::debug;

pub mod error;
mod lexer;
pub mod printer;

pub use printer::CuePrinter;

/// Parses a complete CUE sheet.
pub fn parse(source: &str) -> CueResult<Disc> {
    CueParser::new(source).parse()
}

/// Renders a disc as a CUE sheet.
pub fn print(disc: &Disc) -> String {
    CuePrinter::new(disc).to_string()
}

/// Parser state for a single CUE sheet. Every parse owns its own state.
pub struct CueParser<'a> {
    source: &'a str,
    disc: Disc,
    current_file: Option<(String, FileType)>,
    line: usize,
}

impl<'a> CueParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            disc: Disc::new(),
            current_file: None,
            line: 0,
        }
    }

    pub fn parse(mut self) -> CueResult<Disc> {
        let source = self.source.trim_start_matches('\u{feff}');

        for (idx, line) in source.lines().enumerate() {
            self.line = idx + 1;

            let tokens = tokenize(line, self.line)?;
            let Some((keyword, args)) = tokens.split_first() else {
                continue;
            };

            self.statement(&keyword.text().to_ascii_uppercase(), args)?;
        }

        self.disc.infer_track_lengths();
        self.disc.mode = derive_disc_mode(&self.disc);

        debug!("Parsed CUE sheet with {} tracks", self.disc.track_count());
        Ok(self.disc)
    }

    fn statement(&mut self, keyword: &str, args: &[Token]) -> CueResult<()> {
        match keyword {
            "REM" => self.remark(args)?,
            "CATALOG" => {
                self.require_global(keyword)?;
                self.disc.catalog = Some(self.value(keyword, args)?);
            }
            "CDTEXTFILE" => {
                self.require_global(keyword)?;
                self.disc.cdtext_file = Some(self.value(keyword, args)?);
            }
            "FILE" => self.file(args)?,
            "TRACK" => self.track(args)?,
            "ISRC" | "TRACK_ISRC" => {
                let isrc = self.value(keyword, args)?;
                self.current_track(keyword)?.isrc = Some(isrc);
            }
            "FLAGS" => self.flags(args)?,
            "PREGAP" => {
                let length = self.time(keyword, args)?;
                self.current_track(keyword)?.pre_gap.length = Some(length);
            }
            "POSTGAP" => {
                let length = self.time(keyword, args)?;
                self.current_track(keyword)?.post_gap.length = Some(length);
            }
            "INDEX" => self.index(args)?,
            _ => {
                let pti = Pti::from_key(keyword).ok_or_else(|| CueError::UnknownStatement {
                    line: self.line,
                    keyword: keyword.to_string(),
                })?;
                let value = self.value(keyword, args)?;
                self.disc.active_cdtext_mut().set(pti, value);
            }
        }

        Ok(())
    }

    fn remark(&mut self, args: &[Token]) -> CueResult<()> {
        let Some((key, rest)) = args.split_first() else {
            return Ok(());
        };
        let name = key.text().to_ascii_uppercase();

        if name == "GENRE" {
            let genre = self.value("REM GENRE", rest)?;
            self.disc.active_cdtext_mut().set(Pti::Genre, genre);
            return Ok(());
        }

        match RemKey::from_name(&name) {
            Some(rem) => {
                let value = self.value(&format!("REM {name}"), rest)?;
                self.disc.active_cdtext_mut().set_remark(rem, value);
            }
            None => debug!("line {}: discarding unknown remark {name}", self.line),
        }

        Ok(())
    }

    fn file(&mut self, args: &[Token]) -> CueResult<()> {
        let (file_type, name) = match args.split_last() {
            Some((file_type, name)) if !name.is_empty() => (file_type, name),
            _ => {
                return Err(CueError::MissingArgument {
                    line: self.line,
                    keyword: "FILE".to_string(),
                    expected: "a file name and a file type",
                });
            }
        };

        let name = join(name);
        let file_type = self.parse_file_type(file_type.text())?;

        // A FILE line between two tracks belongs to the next track
        if let Some(track) = self.disc.last_track_mut() {
            if track.index(1).is_none() {
                track.file.name = Some(name.clone());
                track.file.file_type = Some(file_type);
            }
        }

        self.current_file = Some((name, file_type));
        Ok(())
    }

    fn track(&mut self, args: &[Token]) -> CueResult<()> {
        let [number, mode] = args else {
            return Err(CueError::MissingArgument {
                line: self.line,
                keyword: "TRACK".to_string(),
                expected: "a track number and a track type",
            });
        };

        let number = self.parse_number("TRACK", number)?;
        let mode = self.parse_track_type(mode.text())?;
        let current_file = self.current_file.clone();
        let line = self.line;

        let track = self
            .disc
            .add_track()
            .map_err(|source| CueError::Disc { line, source })?;
        track.set_mode(mode);
        if let Some((name, file_type)) = current_file {
            track.file.name = Some(name);
            track.file.file_type = Some(file_type);
        }

        if number as usize != self.disc.track_count() {
            debug!(
                "line {line}: TRACK {number:02} is stored as track {}",
                self.disc.track_count()
            );
        }

        Ok(())
    }

    fn flags(&mut self, args: &[Token]) -> CueResult<()> {
        let mut flags = 0;
        for flag in args {
            flags |= match flag.text().to_ascii_uppercase().as_str() {
                "DCP" => TrackFlags::COPY_PERMITTED,
                "4CH" | "FOUR_CH" => TrackFlags::FOUR_CHANNEL,
                "PRE" => TrackFlags::PRE_EMPHASIS,
                "SCMS" => TrackFlags::SCMS,
                _ => {
                    return Err(CueError::InvalidFlag {
                        line: self.line,
                        value: flag.text().to_string(),
                    });
                }
            };
        }

        self.current_track("FLAGS")?.flags.set(flags);
        Ok(())
    }

    fn index(&mut self, args: &[Token]) -> CueResult<()> {
        let [number, time] = args else {
            return Err(CueError::MissingArgument {
                line: self.line,
                keyword: "INDEX".to_string(),
                expected: "an index number and a time",
            });
        };

        let number = self.parse_number("INDEX", number)?;
        let offset = self.parse_msf(time.text())?;
        let line = self.line;

        let track = self.current_track("INDEX")?;
        track
            .set_index(number as u8, offset)
            .map_err(|source| CueError::Disc { line, source })?;
        if number == 1 {
            track.file.start = Some(offset);
        }

        Ok(())
    }

    fn current_track(&mut self, keyword: &str) -> CueResult<&mut Track> {
        let line = self.line;
        self.disc
            .last_track_mut()
            .ok_or_else(|| CueError::NoTrackContext {
                line,
                keyword: keyword.to_string(),
            })
    }

    fn require_global(&self, keyword: &str) -> CueResult<()> {
        if self.disc.track_count() > 0 {
            return Err(CueError::NotGlobal {
                line: self.line,
                keyword: keyword.to_string(),
            });
        }
        Ok(())
    }

    fn value(&self, keyword: &str, args: &[Token]) -> CueResult<String> {
        if args.is_empty() {
            return Err(CueError::MissingArgument {
                line: self.line,
                keyword: keyword.to_string(),
                expected: "a value",
            });
        }
        Ok(join(args))
    }

    fn time(&self, keyword: &str, args: &[Token]) -> CueResult<u64> {
        match args {
            [time] => self.parse_msf(time.text()),
            _ => Err(CueError::MissingArgument {
                line: self.line,
                keyword: keyword.to_string(),
                expected: "a time in mm:ss:ff",
            }),
        }
    }

    fn parse_number(&self, keyword: &str, token: &Token) -> CueResult<u32> {
        let number = token
            .text()
            .parse::<u32>()
            .map_err(|_| CueError::InvalidNumber {
                line: self.line,
                value: token.text().to_string(),
            })?;

        let range = if keyword == "TRACK" { 1..=99 } else { 0..=99 };
        if !range.contains(&number) {
            return Err(CueError::OutOfRange {
                line: self.line,
                keyword: keyword.to_string(),
                value: number,
            });
        }

        Ok(number)
    }

    fn parse_msf(&self, msf_str: &str) -> CueResult<u64> {
        parse_mmssff(msf_str).map_err(|source| CueError::InvalidTime {
            line: self.line,
            source,
        })
    }

    fn parse_file_type(&self, type_str: &str) -> CueResult<FileType> {
        match type_str.to_ascii_uppercase().as_str() {
            "BINARY" => Ok(FileType::Binary),
            "MOTOROLA" => Ok(FileType::Motorola),
            "AIFF" => Ok(FileType::Aiff),
            "WAVE" => Ok(FileType::Wave),
            "MP3" => Ok(FileType::Mp3),
            "FLAC" => Ok(FileType::Flac),
            _ => Err(CueError::InvalidFileType {
                line: self.line,
                value: type_str.to_string(),
            }),
        }
    }

    fn parse_track_type(&self, type_str: &str) -> CueResult<TrackMode> {
        match type_str.to_ascii_uppercase().replace('_', "/").as_str() {
            "AUDIO" => Ok(TrackMode::Audio),
            "MODE1/2048" => Ok(TrackMode::Mode1),
            "MODE1/2352" => Ok(TrackMode::Mode1Raw),
            "MODE2/2336" => Ok(TrackMode::Mode2),
            "MODE2/2048" => Ok(TrackMode::Mode2Form1),
            "MODE2/2324" | "MODE2/2342" => Ok(TrackMode::Mode2Form2),
            "MODE2/2332" => Ok(TrackMode::Mode2FormMix),
            "MODE2/2352" => Ok(TrackMode::Mode2Raw),
            _ => Err(CueError::InvalidTrackType {
                line: self.line,
                value: type_str.to_string(),
            }),
        }
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn derive_disc_mode(disc: &Disc) -> DiscMode {
    let tracks = disc.tracks();

    if tracks.iter().all(|track| track.mode.is_audio()) {
        DiscMode::CdDa
    } else if tracks.iter().any(|track| track.mode.is_mode2()) {
        DiscMode::CdRomXa
    } else {
        DiscMode::CdRom
    }
}
