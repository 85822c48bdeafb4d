use crate::cd::error::TimeError;
use crate::cd::time::{FRAMES_PER_SECOND, parse_mmssff};
use crate::cd::{DiscMode, SubMode, TrackFlags, TrackMode};
use crate::disc::cdtext::{Cdtext, Pti};
use crate::disc::error::DiscError;
use crate::disc::{Disc, Track};
use crate::toc::error::{TocError, TocResult};
use crate::toc::lexer::{Spanned, Token, tokenize};
use log::debug;

pub mod error;
mod lexer;
pub mod printer;

pub use printer::TocPrinter;

/// Audio samples per frame at 44.1 kHz
pub const SAMPLES_PER_FRAME: u64 = 44_100 / FRAMES_PER_SECOND;

/// Parses a complete TOC description.
pub fn parse(source: &str) -> TocResult<Disc> {
    TocParser::new(source).parse()
}

/// Renders a disc as a TOC description.
pub fn print(disc: &Disc) -> String {
    TocPrinter::new(disc).to_string()
}

pub struct TocParser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    position: usize,
    disc: Disc,
    // set once the current track has named its file, later ZERO statements are post-gaps
    file_seen: bool,
}

impl<'a> TocParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            position: 0,
            disc: Disc::new(),
            file_seen: false,
        }
    }

    pub fn parse(mut self) -> TocResult<Disc> {
        self.tokens = tokenize(self.source.trim_start_matches('\u{feff}'))?;

        while let Some(spanned) = self.next() {
            let line = spanned.line;
            let keyword = match spanned.token {
                Token::Word(word) => word,
                other => {
                    return Err(TocError::UnexpectedToken {
                        line,
                        expected: "a statement keyword",
                        found: other.to_string(),
                    });
                }
            };

            self.statement(&keyword, line)?;
        }

        self.finish_track()?;
        self.disc.infer_track_lengths();

        debug!("Parsed TOC description with {} tracks", self.disc.track_count());
        Ok(self.disc)
    }

    fn statement(&mut self, keyword: &str, line: usize) -> TocResult<()> {
        match keyword {
            "CATALOG" => {
                self.require_global(keyword, line)?;
                self.disc.catalog = Some(self.string("a catalog number")?);
            }
            "CD_DA" | "CD_ROM" | "CD_ROM_XA" => {
                self.require_global(keyword, line)?;
                self.disc.mode = match keyword {
                    "CD_DA" => DiscMode::CdDa,
                    "CD_ROM" => DiscMode::CdRom,
                    _ => DiscMode::CdRomXa,
                };
            }
            "CD_TEXT" => self.cd_text()?,
            "TRACK" => self.track(line)?,
            "NO" => {
                let flag = match self.word("COPY or PRE_EMPHASIS")?.as_str() {
                    "COPY" => TrackFlags::COPY_PERMITTED,
                    "PRE_EMPHASIS" => TrackFlags::PRE_EMPHASIS,
                    other => return Err(self.unexpected("COPY or PRE_EMPHASIS", other)),
                };
                self.current_track(keyword, line)?.flags.clear(flag);
            }
            "COPY" => self
                .current_track(keyword, line)?
                .flags
                .set(TrackFlags::COPY_PERMITTED),
            "PRE_EMPHASIS" => self
                .current_track(keyword, line)?
                .flags
                .set(TrackFlags::PRE_EMPHASIS),
            "TWO_CHANNEL_AUDIO" => self
                .current_track(keyword, line)?
                .flags
                .clear(TrackFlags::FOUR_CHANNEL),
            "FOUR_CHANNEL_AUDIO" => self
                .current_track(keyword, line)?
                .flags
                .set(TrackFlags::FOUR_CHANNEL),
            "ISRC" => {
                let isrc = self.string("an ISRC code")?;
                self.current_track(keyword, line)?.isrc = Some(isrc);
            }
            "SILENCE" | "ZERO" => self.zero(keyword, line)?,
            "FILE" | "AUDIOFILE" => {
                let name = self.string("a file name")?;
                let start = self.time()?;
                let length = self.optional_time()?;
                self.file(keyword, line, name, Some(start), length)?;
            }
            "DATAFILE" => {
                let name = self.string("a file name")?;
                let length = self.optional_time()?;
                self.file(keyword, line, name, None, length)?;
            }
            "FIFO" => {
                let name = self.string("a fifo name")?;
                let length = self.time()?;
                self.file(keyword, line, name, Some(0), Some(length))?;
            }
            "START" => self.start(line)?,
            "PREGAP" => {
                let length = self.time()?;
                self.current_track(keyword, line)?.pre_gap.length = Some(length);
            }
            "INDEX" => self.index(line)?,
            _ => {
                return Err(TocError::UnexpectedToken {
                    line,
                    expected: "a statement keyword",
                    found: keyword.to_string(),
                });
            }
        }

        Ok(())
    }

    fn track(&mut self, line: usize) -> TocResult<()> {
        let mode = match self.word("a track mode")?.as_str() {
            "AUDIO" => TrackMode::Audio,
            "MODE1" => TrackMode::Mode1,
            "MODE1_RAW" => TrackMode::Mode1Raw,
            "MODE2" => TrackMode::Mode2,
            "MODE2_FORM1" => TrackMode::Mode2Form1,
            "MODE2_FORM2" => TrackMode::Mode2Form2,
            "MODE2_FORM_MIX" => TrackMode::Mode2FormMix,
            "MODE2_RAW" => TrackMode::Mode2Raw,
            other => return Err(self.unexpected("a track mode", other)),
        };

        let sub_mode = match self.peek_word() {
            Some("RW") => Some(SubMode::Rw),
            Some("RW_RAW") => Some(SubMode::RwRaw),
            _ => None,
        };
        if sub_mode.is_some() {
            self.position += 1;
        }

        self.finish_track()?;
        self.file_seen = false;

        let track = self
            .disc
            .add_track()
            .map_err(|source| TocError::Disc { line, source })?;
        track.set_mode(mode);
        track.sub_mode = sub_mode.unwrap_or_default();

        Ok(())
    }

    /// Falls back to the file start for a track that never saw a START statement.
    fn finish_track(&mut self) -> TocResult<()> {
        let line = self.line();
        let Some(track) = self.disc.last_track_mut() else {
            return Ok(());
        };

        if track.index(1).is_none() {
            if let Some(start) = track.start() {
                track
                    .set_index(1, start)
                    .map_err(|source| TocError::Disc { line, source })?;
            }
        }

        Ok(())
    }

    fn zero(&mut self, keyword: &str, line: usize) -> TocResult<()> {
        // optional data and sub-channel modes, irrelevant for silence
        while self.peek_word().is_some() {
            self.position += 1;
        }

        let length = self.time()?;
        let file_seen = self.file_seen;
        let track = self.current_track(keyword, line)?;

        if file_seen {
            track.post_gap.length = Some(length);
        } else {
            track.pre_gap.length = Some(length);
        }

        Ok(())
    }

    fn file(
        &mut self,
        keyword: &str,
        line: usize,
        name: String,
        start: Option<u64>,
        length: Option<u64>,
    ) -> TocResult<()> {
        let start = match start {
            Some(start) => start,
            None => self.continuation_start(&name),
        };

        let track = self.current_track(keyword, line)?;
        if track.filename().is_some() {
            debug!("line {line}: {keyword} replaces the file of the current track");
        }

        track.file.name = Some(name);
        track.file.start = Some(start);
        track.file.length = length;
        self.file_seen = true;

        Ok(())
    }

    /// A data file without an explicit start picks up where the previous track of the same file ended.
    fn continuation_start(&self, name: &str) -> u64 {
        let tracks = self.disc.tracks();
        let previous = match tracks.len() {
            0 | 1 => None,
            n => tracks.get(n - 2),
        };

        match previous {
            Some(track) if track.filename() == Some(name) => track
                .start()
                .unwrap_or(0)
                .saturating_add(track.length().unwrap_or(0)),
            _ => 0,
        }
    }

    /// A bare START makes everything read so far in the track its pregap.
    fn start(&mut self, line: usize) -> TocResult<()> {
        let explicit = self.optional_time()?;
        let track = self.current_track("START", line)?;

        let Some(file_start) = track.start() else {
            // silence before the file is already the pre-gap
            debug!("line {line}: START without a file keeps the pre-gap");
            return Ok(());
        };

        let offset = match (explicit, track.length()) {
            (Some(offset), _) => offset,
            (None, Some(length)) => length,
            (None, None) => {
                debug!("line {line}: START without an offset after a file of unknown length");
                0
            }
        };

        if let Some(length) = track.length() {
            if offset > length {
                return Err(TocError::StartBeyondLength {
                    line,
                    start: offset,
                    length,
                });
            }
            track.file.length = Some(length - offset);
        }

        let track_start = offset_sum(file_start, offset, line)?;
        let disc_error = |source: DiscError| TocError::Disc { line, source };
        track.set_index(0, file_start).map_err(disc_error)?;
        track.set_index(1, track_start).map_err(disc_error)?;
        track.file.start = Some(track_start);

        Ok(())
    }

    fn index(&mut self, line: usize) -> TocResult<()> {
        let offset = self.time()?;
        let track = self.current_track("INDEX", line)?;
        let disc_error = |source: DiscError| TocError::Disc { line, source };

        let Some(start) = track.start() else {
            return Err(TocError::NoFile {
                line,
                keyword: "INDEX".to_string(),
            });
        };

        if track.index(1).is_none() {
            track.set_index(1, start).map_err(disc_error)?;
        }

        let base = track.index(0).unwrap_or(start);
        track
            .add_index(offset_sum(base, offset, line)?)
            .map_err(disc_error)?;

        Ok(())
    }

    fn cd_text(&mut self) -> TocResult<()> {
        self.expect(Token::LeftBrace, "'{'")?;

        if self.peek_word() == Some("LANGUAGE_MAP") {
            self.position += 1;
            self.language_map()?;
        }

        while self.peek_word() == Some("LANGUAGE") {
            self.position += 1;
            let language = self.number("a language number")?;
            self.expect(Token::LeftBrace, "'{'")?;

            let mut block = Cdtext::new();
            while !self.eat(&Token::RightBrace) {
                let line = self.line();
                let key = self.word("a CD-TEXT field or '}'")?;
                let pti = Pti::from_key(&key).ok_or_else(|| TocError::UnexpectedToken {
                    line,
                    expected: "a CD-TEXT field",
                    found: key.clone(),
                })?;
                let value = self.cdtext_value()?;
                block.set(pti, value);
            }

            if language == 0 {
                let target = self.disc.active_cdtext_mut();
                for (pti, value) in block.fields() {
                    target.set(pti, value);
                }
            } else {
                debug!("discarding CD-TEXT block for language {language}");
            }
        }

        self.expect(Token::RightBrace, "'}'")
    }

    fn language_map(&mut self) -> TocResult<()> {
        self.expect(Token::LeftBrace, "'{'")?;

        while !self.eat(&Token::RightBrace) {
            self.number("a language number")?;
            self.expect(Token::Colon, "':'")?;
            match self.next() {
                Some(Spanned {
                    token: Token::Number(_) | Token::Word(_),
                    ..
                }) => {}
                other => return Err(self.unexpected_token("a language code", other)),
            }
            self.eat(&Token::Comma);
        }

        Ok(())
    }

    fn cdtext_value(&mut self) -> TocResult<String> {
        match self.next() {
            Some(Spanned {
                token: Token::Str(text),
                ..
            }) => Ok(text),
            Some(Spanned {
                token: Token::LeftBrace,
                ..
            }) => {
                let mut bytes = Vec::new();
                while !self.eat(&Token::RightBrace) {
                    bytes.push(self.number("a byte value")?.to_string());
                    self.eat(&Token::Comma);
                }
                Ok(bytes.join(","))
            }
            other => Err(self.unexpected_token("a string or a byte list", other)),
        }
    }

    fn current_track(&mut self, keyword: &str, line: usize) -> TocResult<&mut Track> {
        self.disc
            .last_track_mut()
            .ok_or_else(|| TocError::NoTrackContext {
                line,
                keyword: keyword.to_string(),
            })
    }

    fn require_global(&self, keyword: &str, line: usize) -> TocResult<()> {
        if self.disc.track_count() > 0 {
            return Err(TocError::NotGlobal {
                line,
                keyword: keyword.to_string(),
            });
        }
        Ok(())
    }

    /// A time in frames. Plain integers count audio samples.
    fn time(&mut self) -> TocResult<u64> {
        match self.next() {
            Some(Spanned {
                token: Token::Time(text),
                line,
            }) => parse_mmssff(&text).map_err(|source| TocError::InvalidTime { line, source }),
            Some(Spanned {
                token: Token::Number(samples),
                ..
            }) => Ok(samples / SAMPLES_PER_FRAME),
            other => Err(self.unexpected_token("a time", other)),
        }
    }

    fn optional_time(&mut self) -> TocResult<Option<u64>> {
        match self.peek() {
            Some(Token::Time(_) | Token::Number(_)) => self.time().map(Some),
            _ => Ok(None),
        }
    }

    fn string(&mut self, expected: &'static str) -> TocResult<String> {
        match self.next() {
            Some(Spanned {
                token: Token::Str(text),
                ..
            }) => Ok(text),
            other => Err(self.unexpected_token(expected, other)),
        }
    }

    fn word(&mut self, expected: &'static str) -> TocResult<String> {
        match self.next() {
            Some(Spanned {
                token: Token::Word(word),
                ..
            }) => Ok(word),
            other => Err(self.unexpected_token(expected, other)),
        }
    }

    fn number(&mut self, expected: &'static str) -> TocResult<u64> {
        match self.next() {
            Some(Spanned {
                token: Token::Number(number),
                ..
            }) => Ok(number),
            other => Err(self.unexpected_token(expected, other)),
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> TocResult<()> {
        if self.eat(&token) {
            Ok(())
        } else {
            let found = self.next();
            Err(self.unexpected_token(expected, found))
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|spanned| &spanned.token)
    }

    fn peek_word(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Word(word)) => Some(word),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.position).cloned();
        if spanned.is_some() {
            self.position += 1;
        }
        spanned
    }

    /// Line of the token under the cursor, or of the last token at end of input.
    fn line(&self) -> usize {
        self.tokens
            .get(self.position)
            .or(self.tokens.last())
            .map_or(1, |spanned| spanned.line)
    }

    fn unexpected(&self, expected: &'static str, found: &str) -> TocError {
        let line = self.tokens[..self.position].last().map_or(1, |s| s.line);
        TocError::UnexpectedToken {
            line,
            expected,
            found: found.to_string(),
        }
    }

    fn unexpected_token(&self, expected: &'static str, found: Option<Spanned>) -> TocError {
        match found {
            Some(spanned) => TocError::UnexpectedToken {
                line: spanned.line,
                expected,
                found: spanned.token.to_string(),
            },
            None => TocError::UnexpectedEnd {
                line: self.line(),
                expected,
            },
        }
    }
}

fn offset_sum(base: u64, offset: u64, line: usize) -> TocResult<u64> {
    base.checked_add(offset).ok_or_else(|| TocError::InvalidTime {
        line,
        source: TimeError::OutOfRange(format!("{base} + {offset} frames")),
    })
}
