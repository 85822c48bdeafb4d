use cuetoc_lib::format::{self, STDIO_PATH, resolve_format};
use cuetoc_lib::{CueTocResult, Disc, ErrorKind, Format};
use futures::future::join_all;
use log::{debug, error};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{failed} of {total} files could not be processed")]
pub struct BatchError {
    pub failed: usize,
    pub total: usize,
}

/// Operands to read, standard input when none were given.
pub fn operands(inputs: Vec<PathBuf>) -> Vec<PathBuf> {
    if inputs.is_empty() {
        vec![PathBuf::from(STDIO_PATH)]
    } else {
        inputs
    }
}

pub async fn load_disc(path: &Path, format: Option<Format>) -> CueTocResult<Disc> {
    let format = resolve_format(format, path)?;
    debug!("Loading {} as {format}", path.display());
    format::load(path, format).await
}

/// Loads every path concurrently. Results keep the order of `paths`.
pub async fn load_all(paths: &[PathBuf], format: Option<Format>) -> Vec<CueTocResult<Disc>> {
    join_all(paths.iter().map(|path| load_disc(path, format))).await
}

pub fn report_failure(path: &Path, kind: ErrorKind, err: &dyn Display) {
    error!("{}: {kind:?}: {err}", path.display());
}
