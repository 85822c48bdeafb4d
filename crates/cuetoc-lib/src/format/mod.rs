use crate::disc::Disc;
use crate::error::{CueTocError, CueTocResult};
use crate::{cue, toc};
use log::{debug, warn};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Path that stands for standard input when loading and standard output when saving.
pub const STDIO_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Cue,
    Toc,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Cue => "cue",
            Format::Toc => "toc",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for Format {
    type Err = CueTocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cue" => Ok(Format::Cue),
            "toc" => Ok(Format::Toc),
            _ => Err(CueTocError::UnknownFormatName(s.to_string())),
        }
    }
}

/// Detects the dialect from a case-insensitive `.cue` or `.toc` suffix.
pub fn format_from_suffix(path: &Path) -> CueTocResult<Format> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("cue") => Ok(Format::Cue),
        Some("toc") => Ok(Format::Toc),
        _ => Err(CueTocError::UnknownFormat(path.to_path_buf())),
    }
}

/// An explicit format wins, otherwise the file name decides.
pub fn resolve_format(explicit: Option<Format>, path: &Path) -> CueTocResult<Format> {
    match explicit {
        Some(format) => Ok(format),
        None => format_from_suffix(path),
    }
}

pub fn parse_str(text: &str, format: Format) -> CueTocResult<Disc> {
    let disc = match format {
        Format::Cue => cue::parse(text)?,
        Format::Toc => toc::parse(text)?,
    };
    Ok(disc)
}

pub fn to_string(disc: &Disc, format: Format) -> String {
    match format {
        Format::Cue => cue::print(disc),
        Format::Toc => toc::print(disc),
    }
}

/// Reads and parses a whole file, or standard input for `-`.
pub async fn load(path: &Path, format: Format) -> CueTocResult<Disc> {
    let bytes = if path.as_os_str() == STDIO_PATH {
        let mut bytes = Vec::new();
        tokio::io::stdin().read_to_end(&mut bytes).await?;
        bytes
    } else {
        tokio::fs::read(path).await?
    };

    debug!("Loaded {} bytes from {} as {format}", bytes.len(), path.display());

    parse_str(&decode_text(bytes, path), format)
}

/// UTF-8 text as is, anything else read as Latin-1.
fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 (at byte {}), reading it as Latin-1",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Renders a disc and writes it to a file, or standard output for `-`.
pub async fn save(path: &Path, format: Format, disc: &Disc) -> CueTocResult<()> {
    let text = to_string(disc, format);

    if path.as_os_str() == STDIO_PATH {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(path, text.as_bytes()).await?;
    }

    debug!("Wrote {} as {format}", path.display());
    Ok(())
}
