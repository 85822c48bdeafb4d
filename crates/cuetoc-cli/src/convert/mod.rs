use crate::commands::convert::ConvertCommand;
use crate::input::{BatchError, load_disc, report_failure};
use cuetoc_lib::format::{self, STDIO_PATH, format_from_suffix, resolve_format};
use cuetoc_lib::{CueTocError, ErrorKind, Format};
use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Output file {0} already exists, use --force to overwrite")]
    OutputAlreadyExists(PathBuf),

    #[error("--output can only be used with a single input")]
    OutputWithMultipleInputs,

    #[error(transparent)]
    CueTocError(#[from] CueTocError),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::OutputAlreadyExists(_) | ConvertError::OutputWithMultipleInputs => ErrorKind::Io,
            ConvertError::CueTocError(e) => e.kind(),
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

pub async fn convert_files(pb: MultiProgress, cmd: ConvertCommand) -> anyhow::Result<()> {
    if cmd.output.is_some() && cmd.inputs.len() > 1 {
        return Err(ConvertError::OutputWithMultipleInputs.into());
    }

    let bar = pb.add(ProgressBar::new(cmd.inputs.len() as u64));
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    let results = {
        let bar = &bar;
        let cmd = &cmd;
        join_all(cmd.inputs.iter().map(|input| async move {
            let result = convert_file(input, cmd).await;
            bar.set_message(input.display().to_string());
            bar.inc(1);
            result
        }))
        .await
    };
    bar.finish_and_clear();

    let mut failed = 0;
    for (input, result) in cmd.inputs.iter().zip(results) {
        match result {
            Ok(output) => info!("Converted {} to {}", input.display(), output.display()),
            Err(e) => {
                report_failure(input, e.kind(), &e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(BatchError {
            failed,
            total: cmd.inputs.len(),
        }
        .into());
    }

    Ok(())
}

/// Converts one input and returns the path written to.
pub async fn convert_file(input: &Path, cmd: &ConvertCommand) -> ConvertResult<PathBuf> {
    let input_format = resolve_format(cmd.input_format, input)?;
    let output_format = output_format(input_format, cmd.output_format, cmd.output.as_deref());
    let output = output_path(input, cmd.output.as_deref(), output_format);

    if output.as_os_str() != STDIO_PATH && fs::metadata(&output).await.is_ok() && !cmd.force {
        return Err(ConvertError::OutputAlreadyExists(output));
    }

    let disc = load_disc(input, Some(input_format)).await?;
    debug!(
        "Writing {} tracks from {} as {output_format}",
        disc.track_count(),
        input.display()
    );
    format::save(&output, output_format, &disc).await?;

    Ok(output)
}

/// Explicit format first, then the suffix of an explicit output path, then the other dialect.
fn output_format(input_format: Format, explicit: Option<Format>, output: Option<&Path>) -> Format {
    if let Some(format) = explicit {
        return format;
    }

    match output.map(format_from_suffix) {
        Some(Ok(format)) => format,
        _ => match input_format {
            Format::Cue => Format::Toc,
            Format::Toc => Format::Cue,
        },
    }
}

fn output_path(input: &Path, output: Option<&Path>, format: Format) -> PathBuf {
    match output {
        Some(output) => output.to_path_buf(),
        None if input.as_os_str() == STDIO_PATH => PathBuf::from(STDIO_PATH),
        None => input.with_extension(format.extension()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(inputs: Vec<PathBuf>) -> ConvertCommand {
        ConvertCommand {
            inputs,
            output: None,
            input_format: None,
            output_format: None,
            force: false,
        }
    }

    #[test]
    fn output_defaults_to_the_other_dialect() {
        assert_eq!(output_format(Format::Cue, None, None), Format::Toc);
        assert_eq!(output_format(Format::Toc, None, None), Format::Cue);
        assert_eq!(
            output_format(Format::Cue, None, Some(Path::new("out.cue"))),
            Format::Cue
        );
        assert_eq!(
            output_format(Format::Cue, Some(Format::Cue), Some(Path::new("out.toc"))),
            Format::Cue
        );
    }

    #[test]
    fn output_path_follows_the_input() {
        assert_eq!(
            output_path(Path::new("dir/disc.cue"), None, Format::Toc),
            PathBuf::from("dir/disc.toc")
        );
        assert_eq!(output_path(Path::new("-"), None, Format::Toc), PathBuf::from("-"));
        assert_eq!(
            output_path(Path::new("disc.cue"), Some(Path::new("x.toc")), Format::Toc),
            PathBuf::from("x.toc")
        );
    }

    #[tokio::test]
    async fn converts_next_to_the_input() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("disc.cue");
        fs::write(
            &input,
            "TITLE \"Loveless\"\nFILE \"a.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n",
        )
        .await?;

        let cmd = command(vec![input.clone()]);
        let output = convert_file(&input, &cmd).await?;

        assert_eq!(output, dir.path().join("disc.toc"));
        let written = fs::read_to_string(&output).await?;
        assert!(written.contains("TITLE \"Loveless\""));
        assert!(written.contains("FILE \"a.wav\" 0\n"));

        let err = convert_file(&input, &cmd).await.unwrap_err();
        assert!(matches!(err, ConvertError::OutputAlreadyExists(_)));

        let forced = ConvertCommand { force: true, ..cmd };
        assert!(convert_file(&input, &forced).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn parse_failures_keep_their_kind() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("broken.toc");
        fs::write(&input, "CD_DA\nTRACK AUDIO\nFILE \"a.wav\"\n").await?;

        let err = convert_file(&input, &command(vec![input.clone()])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(fs::metadata(dir.path().join("broken.cue")).await.is_err());
        Ok(())
    }
}
